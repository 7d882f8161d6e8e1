use std::collections::HashSet;
use std::path::Path;

use educa_core::config::EducaConfig;
use educa_core::identity::{UsernameGenerator, UsernameLookup};
use educa_core::roster::Roster;

use super::load_config;

/// Run the `username` command: print the first free username for a name.
pub fn run(
    config_path: &str,
    full_name: &str,
    taken_path: Option<&str>,
    max_attempts: Option<usize>,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let username = generate(&config, full_name, taken_path, max_attempts)?;
    println!("{username}");
    Ok(())
}

/// Run the `candidates` command: print the named candidates in probing order.
pub fn candidates(config_path: &str, full_name: &str) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let generator = UsernameGenerator::new(config.accounts.username_max_attempts);
    for (position, candidate) in generator.candidates(full_name)?.iter().enumerate() {
        println!("{:>2}. {candidate}", position + 1);
    }
    Ok(())
}

fn generate(
    config: &EducaConfig,
    full_name: &str,
    taken_path: Option<&str>,
    max_attempts: Option<usize>,
) -> anyhow::Result<String> {
    let roster = Roster::load(Path::new(&config.educa.roster_path))?;
    let taken = match taken_path {
        Some(path) => read_taken(Path::new(path))?,
        None => HashSet::new(),
    };

    let lookup =
        |candidate: &str| roster.username_exists(candidate) || taken.username_exists(candidate);
    let generator = UsernameGenerator::new(
        max_attempts.unwrap_or(config.accounts.username_max_attempts),
    );
    Ok(generator.generate(full_name, &lookup)?)
}

/// One handle per line; blank lines and `#` comments are skipped.
fn read_taken(path: &Path) -> anyhow::Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}
