// src/services/validate.rs

//! Query parameter coercion.
//!
//! All incoming parameters arrive as strings. These helpers turn them into
//! typed values and reject malformed input with a client error before any
//! upstream call is made.

use std::collections::HashMap;

use serde_json::Number;

use crate::error::{AppError, Result};
use crate::models::{VocabValue, Vocabulary};
use crate::services::resolver;

/// Raw query string parameters of one request.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Raw, untouched value.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Required string, trimmed. Missing or blank fails with `message`.
    pub fn required_with(&self, key: &str, message: &str) -> Result<String> {
        required_with(self.raw(key), message)
    }

    /// Optional string, trimmed. Blank becomes `None`.
    pub fn optional(&self, key: &str) -> Option<String> {
        optional(self.raw(key))
    }

    pub fn number(&self, key: &str) -> Result<Option<Number>> {
        parse_number(self.raw(key), key)
    }

    pub fn boolean(&self, key: &str) -> Result<Option<bool>> {
        parse_boolean(self.raw(key), key)
    }

    pub fn enumeration(&self, vocabulary: &Vocabulary, key: &str) -> Result<Option<VocabValue>> {
        resolver::resolve(vocabulary, self.raw(key), key)
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(values: HashMap<String, String>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for QueryParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Required identifier such as `appId`: trimmed, non-empty.
pub fn required(value: Option<&str>, field: &str) -> Result<String> {
    required_with(value, &format!("{field} is required"))
}

fn required_with(value: Option<&str>, message: &str) -> Result<String> {
    optional(value).ok_or_else(|| AppError::invalid_input(message))
}

/// Trim, mapping blank input to `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Largest integer an IEEE double represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parse a numeric parameter such as `num`.
///
/// Any finite number is accepted and forwarded as given: decimal, exponent
/// and `0x`/`0o`/`0b` notations, signed or fractional. Whole values are
/// forwarded as integers (`1e2` becomes `100`).
pub fn parse_number(value: Option<&str>, field: &str) -> Result<Option<Number>> {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let invalid = || AppError::invalid_input(format!("{field} must be a valid number"));
    let parsed = parse_numeric(raw).ok_or_else(invalid)?;

    if parsed.fract() == 0.0 && parsed.abs() <= MAX_EXACT_INTEGER {
        return Ok(Some(Number::from(parsed as i64)));
    }
    Number::from_f64(parsed).map(Some).ok_or_else(invalid)
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let lower = raw.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a flag: `true`/`1` or `false`/`0`, case-insensitive.
pub fn parse_boolean(value: Option<&str>, field: &str) -> Result<Option<bool>> {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match raw.to_lowercase().as_str() {
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        _ => Err(AppError::invalid_input(format!(
            "{field} must be either true/false or 1/0"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        let num = |raw: &str| parse_number(Some(raw), "num").unwrap();
        assert_eq!(num("25"), Some(Number::from(25)));
        assert_eq!(num(" 10 "), Some(Number::from(10)));
        assert_eq!(num("1e2"), Some(Number::from(100)));
        assert_eq!(num("25.0"), Some(Number::from(25)));
        assert_eq!(parse_number(Some(""), "num").unwrap(), None);
        assert_eq!(parse_number(None, "num").unwrap(), None);
    }

    #[test]
    fn test_parse_number_accepts_any_finite_number() {
        let num = |raw: &str| parse_number(Some(raw), "num").unwrap();
        assert_eq!(num("-3"), Some(Number::from(-3)));
        assert_eq!(num("2.5"), Number::from_f64(2.5));
        assert_eq!(num("0x10"), Some(Number::from(16)));
        assert_eq!(num("0B101"), Some(Number::from(5)));
        assert_eq!(num("+7"), Some(Number::from(7)));
        assert_eq!(num(".5"), Number::from_f64(0.5));
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        for raw in ["abc", "12abc", "NaN", "inf", "Infinity", "0xZZ", "-0x10", "1e999"] {
            let err = parse_number(Some(raw), "num").unwrap_err();
            assert_eq!(err.to_string(), "num must be a valid number", "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_boolean() {
        for raw in ["true", "1", "TRUE", "True"] {
            assert_eq!(parse_boolean(Some(raw), "paginate").unwrap(), Some(true));
        }
        for raw in ["false", "0", "FALSE"] {
            assert_eq!(parse_boolean(Some(raw), "paginate").unwrap(), Some(false));
        }
        assert_eq!(parse_boolean(Some(""), "paginate").unwrap(), None);
        assert_eq!(parse_boolean(None, "paginate").unwrap(), None);
    }

    #[test]
    fn test_parse_boolean_rejects_other() {
        let err = parse_boolean(Some("yes"), "fullDetail").unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "fullDetail must be either true/false or 1/0");
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required(Some("  com.a.b "), "appId").unwrap(), "com.a.b");
        assert_eq!(
            required(Some("   "), "appId").unwrap_err().to_string(),
            "appId is required"
        );
        assert!(required(None, "devId").is_err());
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional(Some(" us ")), Some("us".to_string()));
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_query_params_accessors() {
        let params = QueryParams::from([("term", " clash "), ("num", "5"), ("paginate", "0")]);
        assert_eq!(
            params.required_with("term", "term query parameter is required").unwrap(),
            "clash"
        );
        assert_eq!(params.number("num").unwrap(), Some(Number::from(5)));
        assert_eq!(params.boolean("paginate").unwrap(), Some(false));
        assert_eq!(params.optional("lang"), None);
    }
}
