//! Date normalization to ISO `YYYY-MM-DD`.
//!
//! Argentine invoices print `DD/MM/YYYY`; the model sometimes echoes that,
//! sometimes ISO, sometimes `YYYY/MM/DD`. Handling is purely syntactic: the
//! digits are rearranged and zero-padded, never checked against a calendar.
//! A date the model fabricated but shaped correctly passes through intact.

use chrono::Utc;
use serde_json::Value;

use super::patterns::{DATE_DMY_SLASH, DATE_ISO, DATE_YMD_SLASH};

/// Parse a raw value into ISO `YYYY-MM-DD`, if it has a recognized shape.
pub fn parse_date(raw: Option<&Value>) -> Option<String> {
    let text = raw.and_then(Value::as_str)?.trim();

    if DATE_ISO.is_match(text) {
        return Some(text.to_string());
    }

    if let Some(caps) = DATE_DMY_SLASH.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        return Some(format!("{}-{:02}-{:02}", &caps[3], month, day));
    }

    if let Some(caps) = DATE_YMD_SLASH.captures(text) {
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return Some(format!("{}-{:02}-{:02}", &caps[1], month, day));
    }

    None
}

/// Normalize a raw value into ISO `YYYY-MM-DD`, falling back to today (UTC).
pub fn normalize_date(raw: Option<&Value>) -> String {
    parse_date(raw).unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string())
}

/// Rearrange an ISO date into display form `DD/MM/YYYY`.
///
/// Pure field rearrangement. Input that is not shaped `YYYY-MM-DD` is
/// returned unchanged.
pub fn display_date(iso: &str) -> String {
    if !DATE_ISO.is_match(iso) {
        return iso.to_string();
    }

    // Safe split: the pattern guarantees exactly two dashes
    let mut parts = iso.splitn(3, '-');
    let year = parts.next().unwrap_or_default();
    let month = parts.next().unwrap_or_default();
    let day = parts.next().unwrap_or_default();
    format!("{}/{}/{}", day, month, year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_date_dmy() {
        let v = json!("31/12/2025");
        assert_eq!(parse_date(Some(&v)), Some("2025-12-31".to_string()));
    }

    #[test]
    fn test_parse_date_pads_single_digits() {
        let v = json!("3/1/2025");
        assert_eq!(parse_date(Some(&v)), Some("2025-01-03".to_string()));
    }

    #[test]
    fn test_parse_date_iso_passthrough() {
        let v = json!("2025-12-31");
        assert_eq!(parse_date(Some(&v)), Some("2025-12-31".to_string()));
    }

    #[test]
    fn test_parse_date_ymd_slash() {
        let v = json!("2025/11/3");
        assert_eq!(parse_date(Some(&v)), Some("2025-11-03".to_string()));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(Some(&json!("noviembre"))), None);
        assert_eq!(parse_date(Some(&json!(20251231))), None);
        assert_eq!(parse_date(None), None);
    }

    #[test]
    fn test_normalize_date_fallback_is_iso_shaped() {
        // Today's value depends on the clock, so assert shape only
        let out = normalize_date(Some(&json!("sin fecha")));
        assert!(DATE_ISO.is_match(&out));
    }

    #[test]
    fn test_normalize_date_idempotent() {
        let once = normalize_date(Some(&json!("03/11/2025")));
        let twice = normalize_date(Some(&json!(once.clone())));
        assert_eq!(once, twice);
        assert_eq!(once, "2025-11-03");
    }

    #[test]
    fn test_display_date_rearranges_fields() {
        assert_eq!(display_date("2025-11-03"), "03/11/2025");
        assert_eq!(display_date("0000-01-01"), "01/01/0000");
    }

    #[test]
    fn test_display_date_leaves_unshaped_input() {
        assert_eq!(display_date("03/11/2025"), "03/11/2025");
    }
}
