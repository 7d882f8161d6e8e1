//! A JSON file of provisioned accounts, used by the command-line tooling.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::accounts::AccountDirectory;
use crate::error::{EducaError, Result};
use crate::identity::{MatriculaCounter, UsernameLookup};
use crate::models::inmate::{InmateAccount, InmateSummary};

/// The set of accounts known to the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Roster {
    #[serde(default)]
    accounts: Vec<InmateAccount>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a roster from `path`. A missing file is an empty roster.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let content = std::fs::read_to_string(path)?;
        let roster: Self = serde_json::from_str(&content)?;
        info!(path = %path.display(), accounts = roster.len(), "Loaded roster");
        Ok(roster)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), accounts = self.len(), "Saved roster");
        Ok(())
    }

    /// Add an account; username and matricula must both be unused.
    pub fn insert(&mut self, account: InmateAccount) -> Result<()> {
        if self.username_exists(&account.username) {
            return Err(EducaError::Conflict(format!(
                "username {} is already in use",
                account.username
            )));
        }
        if self.matricula_exists(&account.matricula) {
            return Err(EducaError::Conflict(format!(
                "matricula {} is already in use",
                account.matricula
            )));
        }
        self.accounts.push(account);
        Ok(())
    }

    pub fn find_by_username(&self, username: &str) -> Option<&InmateAccount> {
        self.accounts
            .iter()
            .find(|a| a.username.eq_ignore_ascii_case(username))
    }

    pub fn accounts(&self) -> &[InmateAccount] {
        &self.accounts
    }

    /// Summaries, newest first.
    pub fn summaries(&self) -> Vec<InmateSummary> {
        let mut accounts: Vec<&InmateAccount> = self.accounts.iter().collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        accounts.into_iter().map(InmateAccount::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl UsernameLookup for Roster {
    fn username_exists(&self, candidate: &str) -> bool {
        self.find_by_username(candidate).is_some()
    }
}

impl MatriculaCounter for Roster {
    fn count_with_prefix(&self, base: &str) -> u64 {
        self.accounts
            .iter()
            .filter(|a| a.matricula.starts_with(base))
            .count() as u64
    }
}

impl AccountDirectory for Roster {
    fn matricula_exists(&self, matricula: &str) -> bool {
        self.accounts.iter().any(|a| a.matricula == matricula)
    }
}
