//! Password policy, temporary password generation and Argon2id hashing.

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use rand::Rng;

use crate::config::PasswordsConfig;
use crate::error::{EducaError, Result};

const TEMPORARY_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%&*";

/// Rules a new password must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub allow_numeric_only: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::from(&PasswordsConfig::default())
    }
}

impl From<&PasswordsConfig> for PasswordPolicy {
    fn from(config: &PasswordsConfig) -> Self {
        Self {
            min_length: config.min_length,
            allow_numeric_only: config.allow_numeric_only,
        }
    }
}

impl PasswordPolicy {
    /// Check `password` against the policy.
    ///
    /// `attributes` are values tied to the account (username, matricula,
    /// name words); the password may not equal any of them, ignoring case.
    /// Attributes shorter than three characters are not compared.
    pub fn validate(&self, password: &str, attributes: &[&str]) -> Result<()> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(EducaError::Validation(format!(
                "password must have at least {} characters",
                self.min_length
            )));
        }

        if !self.allow_numeric_only && password.chars().all(|c| c.is_ascii_digit()) {
            return Err(EducaError::Validation(
                "password must not be entirely numeric".into(),
            ));
        }

        let lowered = password.to_lowercase();
        for attribute in attributes {
            let attribute = attribute.trim();
            if attribute.chars().count() >= 3 && attribute.to_lowercase() == lowered {
                return Err(EducaError::Validation(
                    "password is too similar to the account details".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Generate a random password of the given length using alphanumeric chars + symbols.
pub fn generate_temporary_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..TEMPORARY_CHARSET.len());
            TEMPORARY_CHARSET[idx] as char
        })
        .collect()
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| EducaError::Auth(format!("failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against an Argon2id hash.
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| EducaError::Auth(format!("invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
