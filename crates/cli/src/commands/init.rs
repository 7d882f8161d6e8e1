use std::path::Path;

use educa_core::config::EducaConfig;
use tracing::info;

/// Run the `init` command: write a default configuration file.
pub fn run(path: &str, force: bool) -> anyhow::Result<()> {
    let config_path = Path::new(path);
    if config_path.exists() && !force {
        anyhow::bail!("{path} already exists; pass --force to overwrite it");
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created directory: {}", parent.display());
        }
    }

    let config = EducaConfig::generate_default();
    let toml_str = toml::to_string_pretty(&config)?;
    std::fs::write(config_path, &toml_str)?;
    info!("Wrote configuration to {}", config_path.display());

    println!("educa initialized successfully!");
    println!("  Configuration: {}", config_path.display());
    println!("  Roster:        {}", config.educa.roster_path);
    println!(
        "  Matricula:     {}-YYYY-NNNN",
        config.accounts.matricula_prefix
    );

    Ok(())
}
