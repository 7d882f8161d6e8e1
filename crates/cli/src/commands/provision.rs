use std::path::Path;

use educa_core::accounts::{AccountProvisioner, ProvisionRequest, Provisioned};
use educa_core::config::EducaConfig;
use educa_core::roster::Roster;
use tracing::info;

use super::load_config;

/// Run the `provision` command: create an account and store it in the roster.
pub fn run(
    config_path: &str,
    full_name: String,
    matricula: Option<String>,
    password: Option<String>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let request = ProvisionRequest {
        full_name,
        matricula,
        password,
    };
    let provisioned = provision(&config, &request, dry_run)?;
    let account = &provisioned.account;

    if dry_run {
        println!("Dry run, roster not updated.");
    }
    println!("Account: {account}");
    println!("  Username:  {}", account.username);
    println!("  Matricula: {}", account.matricula);
    if let Some(email) = &account.email {
        println!("  Email:     {email}");
    }
    if let Some(temporary) = &provisioned.temporary_password {
        println!("  Temporary password: {temporary}");
        println!("  The password must be changed at first login.");
    }

    Ok(())
}

fn provision(
    config: &EducaConfig,
    request: &ProvisionRequest,
    dry_run: bool,
) -> anyhow::Result<Provisioned> {
    let roster_path = Path::new(&config.educa.roster_path);
    let mut roster = Roster::load(roster_path)?;

    let provisioner = AccountProvisioner::from_config(config);
    let provisioned = provisioner.provision(request, &roster)?;

    if !dry_run {
        roster.insert(provisioned.account.clone())?;
        if let Some(parent) = roster_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        roster.save(roster_path)?;
        info!(roster = %roster_path.display(), total = roster.len(), "Roster updated");
    }

    Ok(provisioned)
}
