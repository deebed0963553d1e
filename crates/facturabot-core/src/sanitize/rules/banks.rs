//! Receiver-bank cleanup.
//!
//! Transfer receipts show two institutions: the issuer printed in the
//! header and the beneficiary's bank. Vision models routinely put the
//! wrong one (or a card processor) in the receiver slot, so this module
//! filters the value against known-name directories instead of trusting it.

use serde_json::Value;

use super::text::normalize_text;

/// Known payment processors and issuer banks, used to clean the
/// receiver-bank field.
///
/// Both lists are data, not code: deployments extend or empty them through
/// configuration without touching the matching rules.
#[derive(Debug, Clone)]
pub struct BankDirectory {
    processors: Vec<String>,
    issuers: Vec<String>,
}

impl BankDirectory {
    /// Build a directory from explicit processor and issuer name lists.
    pub fn new(processors: Vec<String>, issuers: Vec<String>) -> Self {
        Self { processors, issuers }
    }

    /// Directory of names common on Argentine receipts.
    pub fn argentine() -> Self {
        let processors = [
            "Mercado Pago",
            "MODO",
            "Visa",
            "Mastercard",
            "American Express",
            "Link",
            "POS",
        ];
        let issuers = [
            "Banco Galicia",
            "Banco Nación",
            "Banco Provincia",
            "Banco Santander",
            "Santander",
            "BBVA",
            "Banco Macro",
            "HSBC",
            "ICBC",
            "Banco Credicoop",
            "Banco Ciudad",
            "Banco Supervielle",
            "Banco Patagonia",
            "Brubank",
            "Banco Comafi",
        ];

        Self::new(
            processors.iter().map(|s| s.to_string()).collect(),
            issuers.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Whether the text names a payment processor.
    pub fn is_processor(&self, text: &str) -> bool {
        Self::matches_any(&self.processors, text)
    }

    /// Whether the text names a known issuer bank.
    pub fn is_issuer(&self, text: &str) -> bool {
        Self::matches_any(&self.issuers, text)
    }

    /// Normalize the raw receiver-bank value.
    ///
    /// Processors collapse to `""` (a card network is never a receiving
    /// bank). A known issuer name is replaced by the vendor's name, the
    /// best-effort beneficiary label, or `""` when there is no vendor to
    /// substitute. Anything else is kept verbatim, trimmed.
    pub fn normalize_receiver_bank(&self, raw: Option<&Value>, vendor_name: &str) -> String {
        let text = normalize_text(raw);
        if text.is_empty() {
            return String::new();
        }

        if self.is_processor(&text) {
            return String::new();
        }

        if self.is_issuer(&text) {
            let vendor = vendor_name.trim();
            return vendor.to_string();
        }

        text
    }

    // Short entries (POS, Visa, MODO, Link) match whole words only, so
    // "Positivo SRL" is not a processor. Longer entries match as
    // case-insensitive substrings.
    fn matches_any(entries: &[String], text: &str) -> bool {
        let lowered = text.to_lowercase();
        entries.iter().any(|entry| {
            if entry.chars().count() <= 4 {
                text.split(|c: char| !c.is_alphanumeric())
                    .any(|token| token.eq_ignore_ascii_case(entry))
            } else {
                lowered.contains(&entry.to_lowercase())
            }
        })
    }
}

impl Default for BankDirectory {
    fn default() -> Self {
        Self::argentine()
    }
}
