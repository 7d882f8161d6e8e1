use std::path::Path;

use educa_core::roster::Roster;

use super::load_config;

/// Run the `list` command: print roster summaries, newest first.
pub fn run(config_path: &str) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let roster = Roster::load(Path::new(&config.educa.roster_path))?;

    if roster.is_empty() {
        println!("No accounts in {}.", config.educa.roster_path);
        return Ok(());
    }

    println!(
        "{:<15} {:<25} {:<40} {}",
        "MATRICULA", "USERNAME", "FULL NAME", "MUST CHANGE PASSWORD"
    );
    for summary in roster.summaries() {
        println!(
            "{:<15} {:<25} {:<40} {}",
            summary.matricula,
            summary.username,
            summary.full_name,
            if summary.must_change_password { "yes" } else { "no" }
        );
    }
    println!("\nTotal: {}", roster.len());

    Ok(())
}
