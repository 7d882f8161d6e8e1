//! Name normalization shared by the identifier generators.

use unicode_normalization::UnicodeNormalization;

use crate::error::{EducaError, Result};

/// Tokens derived from a full name.
///
/// `first` and `last` are the same token when the name has a single word;
/// `middles` keeps the order the words had in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub first: String,
    pub last: String,
    pub middles: Vec<String>,
}

/// Reduce arbitrary name text to lowercase ASCII letters and whitespace.
///
/// Accents are stripped by canonical decomposition ("José" becomes "jose");
/// digits, punctuation and letters without an ASCII base are dropped.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .nfd()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect();
    kept.trim().to_string()
}

/// Split a full name into normalized first, last and middle tokens.
///
/// Words that normalize to nothing (e.g. "-" or "123") are discarded before
/// the arity rules apply.
pub fn split_full_name(full_name: &str) -> Result<NameParts> {
    let mut tokens: Vec<String> = full_name
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect();

    let first = match tokens.first() {
        Some(first) => first.clone(),
        None => {
            return Err(EducaError::InvalidInput(format!(
                "name {full_name:?} has no usable letters"
            )))
        }
    };

    let last = tokens.pop().unwrap_or_else(|| first.clone());
    let middles = if tokens.len() > 1 {
        tokens.split_off(1)
    } else {
        Vec::new()
    };

    Ok(NameParts {
        first,
        last,
        middles,
    })
}

/// Keep the letters of `token` that are not vowels.
pub fn extract_consonants(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphabetic())
        .filter(|c| !matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .collect()
}
