//! Free-text normalization.
//!
//! Model output is untrusted: a field documented as a string may arrive as a
//! number, an object, null, or not at all. These helpers collapse all of
//! those shapes into trimmed text, an empty string, or a caller-chosen
//! fallback.

use serde_json::Value;

/// Normalize a raw value into trimmed text.
///
/// Only JSON strings are accepted; numbers, objects, arrays, booleans and
/// null all yield `""`. Idempotent over its own output.
pub fn normalize_text(raw: Option<&Value>) -> String {
    match raw.and_then(Value::as_str) {
        Some(s) => s.trim().to_string(),
        None => String::new(),
    }
}

/// Normalize a raw value into non-empty trimmed text, or the fallback.
pub fn text_or(raw: Option<&Value>, fallback: &str) -> String {
    let text = normalize_text(raw);
    if text.is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

/// Normalize a raw value into optional trimmed text.
///
/// Strings pass through trimmed (an all-whitespace string becomes `""`);
/// every other shape is `None`. Used for fields like CVU and address where
/// absence and presence are both meaningful downstream.
pub fn optional_text(raw: Option<&Value>) -> Option<String> {
    raw.and_then(Value::as_str).map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_text_trims() {
        let v = json!("  Factura A-0001  ");
        assert_eq!(normalize_text(Some(&v)), "Factura A-0001");
    }

    #[test]
    fn test_normalize_text_rejects_non_strings() {
        assert_eq!(normalize_text(Some(&json!(42))), "");
        assert_eq!(normalize_text(Some(&json!({"a": 1}))), "");
        assert_eq!(normalize_text(Some(&json!(null))), "");
        assert_eq!(normalize_text(None), "");
    }

    #[test]
    fn test_normalize_text_idempotent() {
        let once = normalize_text(Some(&json!("  hola  ")));
        let twice = normalize_text(Some(&json!(once.clone())));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_text_or_fallback() {
        assert_eq!(text_or(Some(&json!("   ")), "n/a"), "n/a");
        assert_eq!(text_or(Some(&json!(3.14)), "n/a"), "n/a");
        assert_eq!(text_or(Some(&json!(" ok ")), "n/a"), "ok");
        assert_eq!(text_or(None, "n/a"), "n/a");
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(&json!(" CVU 123 "))), Some("CVU 123".to_string()));
        assert_eq!(optional_text(Some(&json!("  "))), Some(String::new()));
        assert_eq!(optional_text(Some(&json!(7))), None);
        assert_eq!(optional_text(None), None);
    }
}
