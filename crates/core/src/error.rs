//! Error types for the educa core crate.

use thiserror::Error;

/// Top-level error type for all educa core operations.
#[derive(Debug, Error)]
pub enum EducaError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// The input cannot produce an identifier (e.g. a name with no letters).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Every username candidate, numbered variants included, is taken.
    #[error("no free username for {name:?} after {attempts} attempts")]
    ExhaustedAttempts { name: String, attempts: usize },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("you must change your temporary password before continuing")]
    PasswordChangeRequired,
}

impl From<serde_json::Error> for EducaError {
    fn from(err: serde_json::Error) -> Self {
        EducaError::Serialization(err.to_string())
    }
}

/// A convenience Result alias that defaults to [`EducaError`].
pub type Result<T> = std::result::Result<T, EducaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = EducaError::Config("missing field".into());
        assert_eq!(err.to_string(), "configuration error: missing field");
    }

    #[test]
    fn io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = EducaError::from(io_err);
        assert!(matches!(err, EducaError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn json_error_from() {
        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = EducaError::from(json_err);
        assert!(matches!(err, EducaError::Serialization(_)));
    }

    #[test]
    fn exhausted_attempts_names_input_and_count() {
        let err = EducaError::ExhaustedAttempts {
            name: "Ana Silva".into(),
            attempts: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Ana Silva\""));
        assert!(msg.contains("50 attempts"));
    }

    #[test]
    fn password_change_required_display() {
        let err = EducaError::PasswordChangeRequired;
        assert!(err.to_string().contains("temporary password"));
    }

    #[test]
    fn result_alias_works() {
        let ok: Result<i32> = Ok(42);
        assert!(ok.is_ok());

        let err: Result<i32> = Err(EducaError::Validation("bad".into()));
        assert!(err.is_err());
    }
}
