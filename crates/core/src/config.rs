//! TOML-based configuration for educa.

use crate::error::{EducaError, Result};
use crate::identity::matricula::DEFAULT_PREFIX;
use crate::identity::username::DEFAULT_MAX_ATTEMPTS;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level educa configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducaConfig {
    pub educa: EducaSection,
    #[serde(default)]
    pub accounts: AccountsConfig,
    #[serde(default)]
    pub passwords: PasswordsConfig,
}

/// Core instance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducaSection {
    pub instance_name: String,
    /// JSON roster of provisioned accounts used by the CLI.
    #[serde(default = "default_roster_path")]
    pub roster_path: String,
}

fn default_roster_path() -> String {
    "roster.json".into()
}

/// Which identifier becomes the account's login handle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoginHandle {
    /// A `first.last` style handle generated from the full name.
    #[default]
    Username,
    /// The matricula code doubles as the login handle.
    Matricula,
}

/// Account identifier settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    #[serde(default = "default_matricula_prefix")]
    pub matricula_prefix: String,
    #[serde(default = "default_max_attempts")]
    pub username_max_attempts: usize,
    #[serde(default)]
    pub login_handle: LoginHandle,
    /// When set, accounts get `{username}@{email_domain}`.
    #[serde(default)]
    pub email_domain: Option<String>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            matricula_prefix: default_matricula_prefix(),
            username_max_attempts: default_max_attempts(),
            login_handle: LoginHandle::default(),
            email_domain: None,
        }
    }
}

fn default_matricula_prefix() -> String {
    DEFAULT_PREFIX.into()
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

/// Password policy and temporary password settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordsConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_temporary_length")]
    pub temporary_length: usize,
    #[serde(default)]
    pub allow_numeric_only: bool,
}

impl Default for PasswordsConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            temporary_length: default_temporary_length(),
            allow_numeric_only: false,
        }
    }
}

fn default_min_length() -> usize {
    6
}

fn default_temporary_length() -> usize {
    10
}

impl EducaConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| EducaError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Validate the configuration, returning an error for invalid combinations.
    pub fn validate(&self) -> Result<()> {
        if self.educa.instance_name.is_empty() {
            return Err(EducaError::Config(
                "educa.instance_name must not be empty".into(),
            ));
        }

        if self.educa.roster_path.is_empty() {
            return Err(EducaError::Config(
                "educa.roster_path must not be empty".into(),
            ));
        }

        let prefix = &self.accounts.matricula_prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EducaError::Config(format!(
                "accounts.matricula_prefix must be non-empty and alphanumeric, got {prefix:?}"
            )));
        }

        if self.accounts.username_max_attempts == 0 {
            return Err(EducaError::Config(
                "accounts.username_max_attempts must be at least 1".into(),
            ));
        }

        if let Some(ref domain) = self.accounts.email_domain {
            if domain.is_empty() || domain.contains('@') {
                return Err(EducaError::Config(format!(
                    "accounts.email_domain is not a valid domain: {domain:?}"
                )));
            }
        }

        if self.passwords.min_length == 0 {
            return Err(EducaError::Config(
                "passwords.min_length must be at least 1".into(),
            ));
        }

        if self.passwords.temporary_length < self.passwords.min_length {
            return Err(EducaError::Config(format!(
                "passwords.temporary_length ({}) is shorter than passwords.min_length ({})",
                self.passwords.temporary_length, self.passwords.min_length
            )));
        }

        Ok(())
    }

    /// Generate a sensible default configuration.
    pub fn generate_default() -> Self {
        Self {
            educa: EducaSection {
                instance_name: "educaTodos".into(),
                roster_path: default_roster_path(),
            },
            accounts: AccountsConfig::default(),
            passwords: PasswordsConfig::default(),
        }
    }
}
