//! Username generation for learner accounts.
//!
//! A full name is turned into an ordered list of `left.right` handles; the
//! first one the lookup reports as free wins. When every handle is taken the
//! primary form gets a numeric suffix, starting at 2.

use tracing::{debug, info};

use super::lookup::UsernameLookup;
use super::normalize::{extract_consonants, split_full_name, NameParts};
use crate::error::{EducaError, Result};

/// Numbered variants probed after the named candidates run out.
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

/// Build the ordered candidate list for a split name.
///
/// Order: `first.last`, then for each middle token `middle.first`,
/// `middle.last`, `first.middle`, `last.middle`, then `first.` plus the
/// consonants of `last` when that differs from `last`. The consonant form
/// only joins names that have middle tokens; a one- or two-word name goes
/// from `first.last` straight to numbered variants. Repeats are dropped,
/// keeping the earliest position.
pub fn candidate_usernames(parts: &NameParts) -> Vec<String> {
    let NameParts {
        first,
        last,
        middles,
    } = parts;

    let mut candidates = Vec::with_capacity(2 + middles.len() * 4);
    let mut push = |left: &str, right: &str| {
        let candidate = format!("{left}.{right}");
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    };

    push(first, last);
    for middle in middles {
        push(middle, first);
        push(middle, last);
        push(first, middle);
        push(last, middle);
    }

    if !middles.is_empty() {
        let consonants = extract_consonants(last);
        if !consonants.is_empty() && consonants != *last {
            push(first, &consonants);
        }
    }

    candidates
}

/// Generates unique usernames from full names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernameGenerator {
    max_attempts: usize,
}

impl Default for UsernameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl UsernameGenerator {
    /// `max_attempts` bounds the numbered variants (`base2` through
    /// `base{max_attempts + 1}`).
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// The named candidates for `full_name`, in probing order.
    pub fn candidates(&self, full_name: &str) -> Result<Vec<String>> {
        let parts = split_full_name(full_name)?;
        Ok(candidate_usernames(&parts))
    }

    /// Return the first candidate for `full_name` that `lookup` reports free.
    ///
    /// Fails with [`EducaError::InvalidInput`] when the name has no usable
    /// letters and with [`EducaError::ExhaustedAttempts`] when every named
    /// and numbered candidate is taken.
    pub fn generate<L>(&self, full_name: &str, lookup: &L) -> Result<String>
    where
        L: UsernameLookup + ?Sized,
    {
        let candidates = self.candidates(full_name)?;
        let mut probed = 0usize;

        for candidate in &candidates {
            probed += 1;
            if !lookup.username_exists(candidate) {
                info!(username = %candidate, probed, "Generated username");
                return Ok(candidate.clone());
            }
            debug!(candidate = %candidate, "Username taken");
        }

        // candidate_usernames always yields the primary form first
        let base = &candidates[0];
        for counter in 2..=self.max_attempts + 1 {
            let candidate = format!("{base}{counter}");
            probed += 1;
            if !lookup.username_exists(&candidate) {
                info!(username = %candidate, probed, "Generated numbered username");
                return Ok(candidate);
            }
            debug!(candidate = %candidate, "Username taken");
        }

        Err(EducaError::ExhaustedAttempts {
            name: full_name.to_string(),
            attempts: probed,
        })
    }
}

/// Generate a username with the default attempt bound.
pub fn generate_username<L>(full_name: &str, lookup: &L) -> Result<String>
where
    L: UsernameLookup + ?Sized,
{
    UsernameGenerator::default().generate(full_name, lookup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    fn taken(handles: &[&str]) -> HashSet<String> {
        handles.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn primary_form_when_free() {
        let result = generate_username("Carlos Eduardo Silveira", &|_: &str| false).unwrap();
        assert_eq!(result, "carlos.silveira");
    }

    #[test]
    fn accents_stripped_in_primary_form() {
        let result = generate_username("José Araújo", &|_: &str| false).unwrap();
        assert_eq!(result, "jose.araujo");
    }

    #[test]
    fn two_token_collision_appends_number() {
        let existing = taken(&["ana.silva"]);
        let result = generate_username("Ana Silva", &existing).unwrap();
        assert_eq!(result, "ana.silva2");
    }

    #[test]
    fn two_token_name_has_only_primary_candidate() {
        let candidates = UsernameGenerator::default().candidates("Ana Silva").unwrap();
        assert_eq!(candidates, vec!["ana.silva"]);
    }

    #[test]
    fn candidate_order_with_middle_names() {
        let candidates = UsernameGenerator::default()
            .candidates("Carlos Eduardo Silveira")
            .unwrap();
        assert_eq!(
            candidates,
            vec![
                "carlos.silveira",
                "eduardo.carlos",
                "eduardo.silveira",
                "carlos.eduardo",
                "silveira.eduardo",
                "carlos.slvr",
            ]
        );
    }

    #[test]
    fn candidate_order_walks_middles_in_input_order() {
        let candidates = UsernameGenerator::default()
            .candidates("Ana Beatriz Costa Lima")
            .unwrap();
        assert_eq!(
            candidates,
            vec![
                "ana.lima",
                "beatriz.ana",
                "beatriz.lima",
                "ana.beatriz",
                "lima.beatriz",
                "costa.ana",
                "costa.lima",
                "ana.costa",
                "lima.costa",
                "ana.lm",
            ]
        );
    }

    #[test]
    fn middle_candidates_probed_in_order() {
        let existing = taken(&["carlos.silveira", "eduardo.carlos"]);
        let result = generate_username("Carlos Eduardo Silveira", &existing).unwrap();
        assert_eq!(result, "eduardo.silveira");
    }

    #[test]
    fn consonant_form_skipped_when_identical_to_last() {
        let candidates = UsernameGenerator::default()
            .candidates("Ana Maria Lynch")
            .unwrap();
        assert_eq!(candidates.len(), 5);
        assert_eq!(candidates.last().map(String::as_str), Some("lynch.maria"));
    }

    #[test]
    fn consonant_form_skipped_when_empty() {
        let candidates = UsernameGenerator::default()
            .candidates("Ana Maria Eau")
            .unwrap();
        assert_eq!(candidates.last().map(String::as_str), Some("eau.maria"));
    }

    #[test]
    fn single_token_name_repeats_itself() {
        let candidates = UsernameGenerator::default().candidates("Ana").unwrap();
        assert_eq!(candidates, vec!["ana.ana"]);
    }

    #[test]
    fn repeated_candidates_are_probed_once() {
        let candidates = UsernameGenerator::default()
            .candidates("Ana Ana Silva")
            .unwrap();
        assert_eq!(
            candidates,
            vec!["ana.silva", "ana.ana", "silva.ana", "ana.slv"]
        );
    }

    #[test]
    fn empty_name_is_invalid() {
        let err = generate_username("", &|_: &str| false).unwrap_err();
        assert!(matches!(err, EducaError::InvalidInput(_)));
    }

    #[test]
    fn symbol_only_name_is_invalid() {
        let err = generate_username("*** 42", &|_: &str| true).unwrap_err();
        assert!(matches!(err, EducaError::InvalidInput(_)));
    }

    #[test]
    fn multiple_numbered_collisions() {
        let existing = taken(&["ana.silva", "ana.silva2", "ana.silva3"]);
        let result = generate_username("Ana Silva", &existing).unwrap();
        assert_eq!(result, "ana.silva4");
    }

    #[test]
    fn case_insensitive_collision_detection() {
        let existing = vec!["Ana.Silva".to_string()];
        let result = generate_username("Ana Silva", existing.as_slice()).unwrap();
        assert_eq!(result, "ana.silva2");
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let existing = taken(&["carlos.silveira", "eduardo.carlos", "carlos.slvr"]);
        let first = generate_username("Carlos Eduardo Silveira", &existing).unwrap();
        for _ in 0..5 {
            let again = generate_username("Carlos Eduardo Silveira", &existing).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn exhaustion_probes_named_then_numbered_through_bound() {
        let probes = RefCell::new(Vec::new());
        let lookup = |c: &str| {
            probes.borrow_mut().push(c.to_string());
            true
        };

        let err = UsernameGenerator::new(2)
            .generate("Carlos Eduardo Silveira", &lookup)
            .unwrap_err();

        let probes = probes.into_inner();
        assert_eq!(
            probes,
            vec![
                "carlos.silveira",
                "eduardo.carlos",
                "eduardo.silveira",
                "carlos.eduardo",
                "silveira.eduardo",
                "carlos.slvr",
                "carlos.silveira2",
                "carlos.silveira3",
            ]
        );
        match err {
            EducaError::ExhaustedAttempts { name, attempts } => {
                assert_eq!(name, "Carlos Eduardo Silveira");
                assert_eq!(attempts, 8);
            }
            other => panic!("expected ExhaustedAttempts, got {other:?}"),
        }
    }

    #[test]
    fn zero_attempts_fails_after_named_candidates() {
        let err = UsernameGenerator::new(0)
            .generate("Ana Silva", &|_: &str| true)
            .unwrap_err();
        assert!(matches!(
            err,
            EducaError::ExhaustedAttempts { attempts: 1, .. }
        ));
    }

    #[test]
    fn last_numbered_variant_is_accepted() {
        let lookup = |c: &str| c != "ana.silva51";
        let result = generate_username("Ana Silva", &lookup).unwrap();
        assert_eq!(result, "ana.silva51");
    }

    #[test]
    fn probing_stops_at_first_free_candidate() {
        let probes = RefCell::new(0usize);
        let lookup = |c: &str| {
            *probes.borrow_mut() += 1;
            c == "carlos.silveira"
        };
        let result = generate_username("Carlos Eduardo Silveira", &lookup).unwrap();
        assert_eq!(result, "eduardo.carlos");
        assert_eq!(probes.into_inner(), 2);
    }
}
