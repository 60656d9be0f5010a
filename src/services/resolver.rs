// src/services/resolver.rs

//! Enum resolver.
//!
//! Maps free-form request strings onto vocabulary values. Resolution tries, in
//! order: an exact key match, a match on the normalized key (hyphens and
//! whitespace become underscores, then uppercase), and finally a match against
//! the vocabulary values themselves.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::{VocabValue, Vocabulary};

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]").expect("separator pattern is valid"));

/// Normalize a raw enum string into key form (`top-free` -> `TOP_FREE`).
pub fn normalize_key(raw: &str) -> String {
    SEPARATORS.replace_all(raw, "_").to_uppercase()
}

/// Resolve `raw` against `vocabulary`.
///
/// Absent or blank input resolves to `None`; the caller picks a default.
/// Unmatched input fails with an error naming `field` and the valid keys.
pub fn resolve(vocabulary: &Vocabulary, raw: Option<&str>, field: &str) -> Result<Option<VocabValue>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Some(value) = vocabulary.get(raw) {
        return Ok(Some(value.clone()));
    }

    let normalized = normalize_key(raw);
    if let Some(value) = vocabulary.get(&normalized) {
        return Ok(Some(value.clone()));
    }

    let by_value = vocabulary.values().find(|value| match value {
        VocabValue::Text(text) => {
            text.to_uppercase() == normalized || text.to_lowercase() == raw.to_lowercase()
        }
        VocabValue::Number(n) => n.to_string() == raw,
    });
    if let Some(value) = by_value {
        return Ok(Some(value.clone()));
    }

    Err(AppError::invalid_input(format!(
        "{field} must be one of: {}",
        vocabulary.keys().collect::<Vec<_>>().join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vocabularies;

    fn vocab() -> Vocabularies {
        Vocabularies::google_play()
    }

    #[test]
    fn test_exact_key() {
        let value = resolve(&vocab().collection, Some("TOP_PAID"), "collection").unwrap();
        assert_eq!(value, Some(VocabValue::text("TOP_PAID")));
    }

    #[test]
    fn test_normalized_key() {
        let v = vocab();
        for raw in ["top_free", "top-free", "top free", "Top-Free"] {
            let value = resolve(&v.collection, Some(raw), "collection").unwrap();
            assert_eq!(value, Some(VocabValue::text("TOP_FREE")), "input {raw:?}");
        }
    }

    #[test]
    fn test_numeric_value_match() {
        let value = resolve(&vocab().sort, Some("2"), "sort").unwrap();
        assert_eq!(value, Some(VocabValue::Number(2)));
    }

    #[test]
    fn test_sort_key_resolves_to_number() {
        let value = resolve(&vocab().sort, Some("helpfulness"), "sort").unwrap();
        assert_eq!(value, Some(VocabValue::Number(1)));
    }

    #[test]
    fn test_string_value_match_case_insensitive() {
        let value = resolve(&vocab().price, Some("FREE"), "price").unwrap();
        assert_eq!(value, Some(VocabValue::text("free")));
    }

    #[test]
    fn test_empty_is_unset() {
        let v = vocab();
        assert_eq!(resolve(&v.category, None, "category").unwrap(), None);
        assert_eq!(resolve(&v.category, Some(""), "category").unwrap(), None);
        assert_eq!(resolve(&v.category, Some("   "), "category").unwrap(), None);
    }

    #[test]
    fn test_unknown_value_lists_keys() {
        let err = resolve(&vocab().sort, Some("oldest"), "sort").unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "sort must be one of: NEWEST, RATING, HELPFULNESS"
        );
    }

    #[test]
    fn test_number_not_in_vocabulary() {
        assert!(resolve(&vocab().sort, Some("7"), "sort").is_err());
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("game-role playing"), "GAME_ROLE_PLAYING");
    }
}
