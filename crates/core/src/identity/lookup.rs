//! Lookup capabilities the identifier generators consult.
//!
//! Generators never talk to a store directly; callers hand them something
//! that answers "is this handle taken?" or "how many codes share this prefix?".

use std::collections::{BTreeSet, HashSet};

/// Answers whether a login handle is already in use.
pub trait UsernameLookup {
    fn username_exists(&self, candidate: &str) -> bool;
}

/// Counts existing matricula codes that start with a given prefix.
pub trait MatriculaCounter {
    fn count_with_prefix(&self, base: &str) -> u64;
}

impl<F> UsernameLookup for F
where
    F: Fn(&str) -> bool,
{
    fn username_exists(&self, candidate: &str) -> bool {
        self(candidate)
    }
}

impl<F> MatriculaCounter for F
where
    F: Fn(&str) -> u64,
{
    fn count_with_prefix(&self, base: &str) -> u64 {
        self(base)
    }
}

// Stored handles may carry any case; the exact match is only a fast path.
impl UsernameLookup for HashSet<String> {
    fn username_exists(&self, candidate: &str) -> bool {
        self.contains(candidate) || self.iter().any(|e| e.eq_ignore_ascii_case(candidate))
    }
}

impl UsernameLookup for BTreeSet<String> {
    fn username_exists(&self, candidate: &str) -> bool {
        self.contains(candidate) || self.iter().any(|e| e.eq_ignore_ascii_case(candidate))
    }
}

impl UsernameLookup for [String] {
    fn username_exists(&self, candidate: &str) -> bool {
        self.iter().any(|e| e.eq_ignore_ascii_case(candidate))
    }
}

impl MatriculaCounter for [String] {
    fn count_with_prefix(&self, base: &str) -> u64 {
        self.iter().filter(|code| code.starts_with(base)).count() as u64
    }
}
