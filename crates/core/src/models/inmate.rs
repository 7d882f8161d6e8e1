use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EducaError, Result};

/// Longest full name an account may carry.
pub const MAX_FULL_NAME_LEN: usize = 150;
/// Longest matricula code an account may carry.
pub const MAX_MATRICULA_LEN: usize = 20;

/// A learner account: the profile plus its login credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InmateAccount {
    pub id: Uuid,
    pub full_name: String,
    pub username: String,
    pub matricula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password_hash: String,
    pub must_change_password: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// The view of an account shown to administrators; credentials are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InmateSummary {
    pub id: Uuid,
    #[serde(rename = "nome_completo")]
    pub full_name: String,
    pub username: String,
    pub matricula: String,
    pub must_change_password: bool,
}

impl InmateAccount {
    pub fn summary(&self) -> InmateSummary {
        InmateSummary {
            id: self.id,
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            matricula: self.matricula.clone(),
            must_change_password: self.must_change_password,
        }
    }
}

impl std::fmt::Display for InmateAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.full_name, self.matricula)
    }
}

/// Trim a full name and check it is usable for an account.
pub fn clean_full_name(full_name: &str) -> Result<String> {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return Err(EducaError::Validation("full name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_FULL_NAME_LEN {
        return Err(EducaError::Validation(format!(
            "full name must have at most {MAX_FULL_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim a caller-supplied matricula and check its shape.
pub fn clean_matricula(matricula: &str) -> Result<String> {
    let trimmed = matricula.trim();
    if trimmed.is_empty() {
        return Err(EducaError::Validation("matricula must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_MATRICULA_LEN {
        return Err(EducaError::Validation(format!(
            "matricula must have at most {MAX_MATRICULA_LEN} characters"
        )));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(EducaError::Validation(
            "matricula must not contain whitespace".into(),
        ));
    }
    Ok(trimmed.to_string())
}
