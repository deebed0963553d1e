//! CUIT (Argentine tax identification number) normalization.

use serde_json::Value;

use super::patterns::CUIT_PATTERN;

/// Sentinel recorded when a document shows no usable tax id.
pub const NO_FIGURA: &str = "No figura";

/// Whether trimmed text already has the canonical CUIT shape.
///
/// Shape only (`\d{2}-?\d{8}-?\d{1}`): the check digit is deliberately not
/// verified. The model transcribes what the document prints, and a receipt
/// with a mistyped CUIT is still that receipt.
pub fn is_cuit(text: &str) -> bool {
    CUIT_PATTERN.is_match(text)
}

/// Normalize a raw tax-id value.
///
/// A value that already looks like a CUIT is kept exactly as printed,
/// dashes and all. Everything else (company names the model misplaced here,
/// dash placeholders, empty, absent, wrong type) becomes the
/// [`NO_FIGURA`] sentinel. Never guesses or synthesizes an id.
pub fn normalize_tax_id(raw: Option<&Value>) -> String {
    match raw.and_then(Value::as_str).map(str::trim) {
        Some(s) if is_cuit(s) => s.to_string(),
        _ => NO_FIGURA.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_cuit_kept_verbatim() {
        let v = json!("30-71675728-1");
        assert_eq!(normalize_tax_id(Some(&v)), "30-71675728-1");
    }

    #[test]
    fn test_undashed_cuit_not_reformatted() {
        let v = json!("30716757281");
        assert_eq!(normalize_tax_id(Some(&v)), "30716757281");
    }

    #[test]
    fn test_company_name_rejected() {
        let v = json!("COCOS CAPITAL SA");
        assert_eq!(normalize_tax_id(Some(&v)), NO_FIGURA);
    }

    #[test]
    fn test_placeholders_rejected() {
        assert_eq!(normalize_tax_id(Some(&json!("-"))), NO_FIGURA);
        assert_eq!(normalize_tax_id(Some(&json!(""))), NO_FIGURA);
        assert_eq!(normalize_tax_id(Some(&json!(30716757281u64))), NO_FIGURA);
        assert_eq!(normalize_tax_id(None), NO_FIGURA);
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_tax_id(Some(&json!("30-71675728-1")));
        let twice = normalize_tax_id(Some(&json!(once.clone())));
        assert_eq!(once, twice);

        let sentinel_again = normalize_tax_id(Some(&json!(NO_FIGURA)));
        assert_eq!(sentinel_again, NO_FIGURA);
    }
}
