pub mod init;
pub mod list;
pub mod matricula;
pub mod provision;
pub mod username;

use std::path::Path;

use educa_core::config::EducaConfig;
use tracing::info;

/// Load and validate the configuration, falling back to defaults when the
/// file does not exist.
pub fn load_config(config_path: &str) -> anyhow::Result<EducaConfig> {
    let path = Path::new(config_path);
    let config = if path.exists() {
        let config = EducaConfig::load(path)?;
        info!("Loaded configuration from {}", config_path);
        config
    } else {
        info!("No configuration at {}, using defaults", config_path);
        EducaConfig::generate_default()
    };
    config.validate()?;
    Ok(config)
}
