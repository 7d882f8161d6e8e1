//! Sequential matricula codes of the form `PREFIX-YEAR-NNNN`.
//!
//! The sequence is derived from a count of the codes already issued for the
//! prefix and year. Two callers that count before either one persists will
//! produce the same code; serializing account creation is left to the caller.

use chrono::{Datelike, Utc};
use tracing::info;

use super::lookup::MatriculaCounter;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "DL";

/// Generates matricula codes for a fixed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatriculaGenerator {
    prefix: String,
}

impl Default for MatriculaGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl MatriculaGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The shared leading part of every code issued in `year`, e.g. `DL-2024-`.
    pub fn base(&self, year: &str) -> String {
        format!("{}-{}-", self.prefix, year)
    }

    /// Next code for `year`: the number of codes already carrying the base,
    /// plus one, zero-padded to four digits. Past 9999 the number just widens.
    pub fn generate<C>(&self, year: &str, counter: &C) -> String
    where
        C: MatriculaCounter + ?Sized,
    {
        let base = self.base(year);
        let sequence = counter.count_with_prefix(&base) + 1;
        let code = format!("{base}{sequence:04}");
        info!(matricula = %code, "Generated matricula");
        code
    }

    /// Next code for the current UTC year.
    pub fn generate_current<C>(&self, counter: &C) -> String
    where
        C: MatriculaCounter + ?Sized,
    {
        self.generate(&current_year(), counter)
    }
}

/// Generate a matricula with the default prefix.
pub fn generate_matricula<C>(year: &str, counter: &C) -> String
where
    C: MatriculaCounter + ?Sized,
{
    MatriculaGenerator::default().generate(year, counter)
}

/// The current UTC year as `YYYY`.
pub fn current_year() -> String {
    format!("{:04}", Utc::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_after_three_existing() {
        assert_eq!(generate_matricula("2024", &|_: &str| 3u64), "DL-2024-0004");
    }

    #[test]
    fn first_of_the_year() {
        assert_eq!(generate_matricula("2025", &|_: &str| 0u64), "DL-2025-0001");
    }

    #[test]
    fn counter_receives_prefix_and_year_base() {
        let counter = |base: &str| {
            assert_eq!(base, "DL-2024-");
            41u64
        };
        assert_eq!(generate_matricula("2024", &counter), "DL-2024-0042");
    }

    #[test]
    fn width_grows_past_9999() {
        assert_eq!(
            generate_matricula("2024", &|_: &str| 9999u64),
            "DL-2024-10000"
        );
    }

    #[test]
    fn custom_prefix() {
        let generator = MatriculaGenerator::new("EJA");
        assert_eq!(generator.prefix(), "EJA");
        assert_eq!(generator.generate("2026", &|_: &str| 9u64), "EJA-2026-0010");
    }

    #[test]
    fn counts_existing_codes_from_slice() {
        let codes = vec![
            "DL-2024-0001".to_string(),
            "DL-2024-0002".to_string(),
            "DL-2023-0007".to_string(),
        ];
        assert_eq!(
            generate_matricula("2024", codes.as_slice()),
            "DL-2024-0003"
        );
    }

    #[test]
    fn current_year_is_four_digits() {
        let year = current_year();
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn generate_current_uses_current_year() {
        let code = MatriculaGenerator::default().generate_current(&|_: &str| 0u64);
        assert_eq!(code, format!("DL-{}-0001", current_year()));
    }
}
