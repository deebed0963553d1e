//! Currency code normalization.

use serde_json::Value;

/// Currency assumed when the model reports none, used across the pipeline.
pub const DEFAULT_CURRENCY: &str = "ARS";

/// Normalize a raw currency value into an uppercase three-letter code.
///
/// Only a trimmed string of exactly three characters is accepted; anything
/// else (wrong length, wrong type, absent) falls back to the default rather
/// than being truncated or padded.
pub fn normalize_currency(raw: Option<&Value>, default: &str) -> String {
    match raw.and_then(Value::as_str).map(str::trim) {
        Some(s) if s.chars().count() == 3 => s.to_uppercase(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_defaults() {
        assert_eq!(normalize_currency(None, DEFAULT_CURRENCY), "ARS");
        assert_eq!(normalize_currency(Some(&json!(null)), DEFAULT_CURRENCY), "ARS");
    }

    #[test]
    fn test_three_letter_code_uppercased() {
        assert_eq!(normalize_currency(Some(&json!("usd")), DEFAULT_CURRENCY), "USD");
        assert_eq!(normalize_currency(Some(&json!(" eur ")), DEFAULT_CURRENCY), "EUR");
    }

    #[test]
    fn test_wrong_length_falls_back_not_truncates() {
        assert_eq!(normalize_currency(Some(&json!("US")), DEFAULT_CURRENCY), "ARS");
        assert_eq!(normalize_currency(Some(&json!("USDT")), DEFAULT_CURRENCY), "ARS");
    }

    #[test]
    fn test_non_string_falls_back() {
        assert_eq!(normalize_currency(Some(&json!(840)), DEFAULT_CURRENCY), "ARS");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_currency(Some(&json!("usd")), DEFAULT_CURRENCY);
        let twice = normalize_currency(Some(&json!(once.clone())), DEFAULT_CURRENCY);
        assert_eq!(once, twice);
    }
}
