//! Invoice sanitizer: turns a raw model payload into a draft record.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

use crate::models::{BotConfig, InvoiceDraft, Metadata, RawExtraction, Taxes};

use super::confidence::FieldSurvey;
use super::rules::{
    calculate_total, normalize_currency, normalize_items, normalize_vendor, parse_date,
    BankDirectory, ItemsSource, TotalSource, DEFAULT_CURRENCY, UNKNOWN_VENDOR,
    amounts::non_negative_number,
    text::{optional_text, text_or},
};

/// Per-extraction facts the payload itself cannot provide.
#[derive(Debug, Clone, Default)]
pub struct SanitizeContext {
    /// Wall-clock time of the full extraction, in milliseconds.
    pub processing_time_ms: u64,

    /// Identifier of the model that produced the payload.
    pub model: Option<String>,
}

/// Composes the field normalizers into one draft-producing pass.
///
/// Never fails. Every unusable raw field is replaced by its documented
/// default, so the output is always invoice-shaped; whether it survives the
/// entity's invariant gate is the caller's next step.
pub struct InvoiceSanitizer {
    banks: BankDirectory,
    default_currency: String,
    default_item_description: String,
    fallback_invoice_number: String,
}

impl InvoiceSanitizer {
    /// Create a sanitizer with the built-in Argentine defaults.
    pub fn new() -> Self {
        Self {
            banks: BankDirectory::argentine(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            default_item_description: "Sin descripción".to_string(),
            fallback_invoice_number: "Sin número".to_string(),
        }
    }

    /// Build a sanitizer from pipeline configuration.
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            banks: config.bank_directory(),
            default_currency: config.extraction.default_currency.clone(),
            default_item_description: config.extraction.default_item_description.clone(),
            fallback_invoice_number: config.extraction.fallback_invoice_number.clone(),
        }
    }

    /// Set the bank directory used for receiver-bank cleanup.
    pub fn with_banks(mut self, banks: BankDirectory) -> Self {
        self.banks = banks;
        self
    }

    /// Set the currency assumed when the model reports none.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Set the description for synthesized or undescribed items.
    pub fn with_item_description(mut self, description: impl Into<String>) -> Self {
        self.default_item_description = description.into();
        self
    }

    /// Set the placeholder for missing invoice numbers.
    pub fn with_invoice_number_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback_invoice_number = fallback.into();
        self
    }

    /// Sanitize a raw payload into a draft record.
    ///
    /// Field order follows the data dependencies: vendor first (the
    /// receiver-bank heuristic substitutes its name), then items (the total
    /// fallback sums their subtotals), then the total, then the receiver
    /// bank; the remaining fields are independent. Confidence is scored
    /// over the survey collected along the way, since the normalized
    /// values alone no longer reveal which of them were fallbacks.
    pub fn sanitize(&self, raw: &RawExtraction, context: &SanitizeContext) -> InvoiceDraft {
        let vendor = normalize_vendor(raw.vendor.as_ref());

        let (items, items_source) = normalize_items(
            raw.items.as_ref(),
            &self.default_item_description,
            raw.total_amount.as_ref(),
        );

        let (total_amount, total_source) = calculate_total(raw.total_amount.as_ref(), &items);

        let receiver_bank = self
            .banks
            .normalize_receiver_bank(raw.receiver_bank.as_ref(), &vendor.name);

        let invoice_number = text_or(raw.invoice_number.as_ref(), &self.fallback_invoice_number);
        let parsed_date = parse_date(raw.date.as_ref());
        let date = parsed_date
            .clone()
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
        let currency = normalize_currency(raw.currency.as_ref(), &self.default_currency);
        let operation_type = optional_field(raw.operation_type.as_ref());
        let payment_method = optional_field(raw.payment_method.as_ref());
        let taxes = normalize_taxes(raw.taxes.as_ref());

        let survey = FieldSurvey {
            has_invoice_number: invoice_number != self.fallback_invoice_number,
            has_date: parsed_date.is_some(),
            has_vendor: vendor.name != UNKNOWN_VENDOR,
            has_total: total_source != TotalSource::Fallback,
            has_items: items_source == ItemsSource::Reported,
            has_operation_type: operation_type.is_some(),
            has_receiver_bank: !receiver_bank.is_empty(),
            has_taxes: taxes.is_some(),
            has_payment_method: payment_method.is_some(),
        };
        let confidence = survey.score();

        debug!(
            "Sanitized invoice {} ({} points, {} confidence)",
            invoice_number,
            survey.points(),
            confidence.as_str()
        );

        InvoiceDraft {
            invoice_number,
            date,
            operation_type,
            vendor,
            total_amount,
            currency,
            receiver_bank,
            items,
            taxes,
            payment_method,
            metadata: Metadata {
                processed_at: Utc::now(),
                processing_time_ms: context.processing_time_ms,
                confidence,
                model: context.model.clone(),
            },
        }
    }
}

impl Default for InvoiceSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

// Optional free-text fields: present only when a non-empty string arrived.
fn optional_field(raw: Option<&Value>) -> Option<String> {
    optional_text(raw).filter(|s| !s.is_empty())
}

// Taxes must arrive as an object; each component clamps to a non-negative
// number, missing components to zero.
fn normalize_taxes(raw: Option<&Value>) -> Option<Taxes> {
    let obj = raw?.as_object()?;
    Some(Taxes {
        iva: non_negative_number(obj.get("iva")).unwrap_or(Decimal::ZERO),
        other_taxes: non_negative_number(obj.get("otherTaxes")).unwrap_or(Decimal::ZERO),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Confidence, Invoice};
    use crate::sanitize::rules::NO_FIGURA;
    use serde_json::json;
    use std::str::FromStr;

    fn sanitize(value: serde_json::Value) -> InvoiceDraft {
        let raw = RawExtraction::from_value(value);
        InvoiceSanitizer::new().sanitize(&raw, &SanitizeContext::default())
    }

    #[test]
    fn test_complete_payload_scores_high() {
        let draft = sanitize(json!({
            "invoiceNumber": "A-0001-00001234",
            "date": "03/11/2025",
            "operationType": "Transferencia",
            "vendor": { "name": "COCOS CAPITAL SA", "taxId": "30-71675728-1" },
            "totalAmount": 1500.5,
            "currency": "ars",
            "receiverBank": "BIND Banco Industrial",
            "items": [{ "description": "Servicio", "quantity": 1, "unitPrice": 1500.5 }],
            "taxes": { "iva": 260.0, "otherTaxes": 0 },
            "paymentMethod": "Transferencia"
        }));

        assert_eq!(draft.date, "2025-11-03");
        assert_eq!(draft.currency, "ARS");
        assert_eq!(draft.metadata.confidence, Confidence::High);

        let invoice = Invoice::new(draft).unwrap();
        assert_eq!(invoice.vendor().tax_id, "30-71675728-1");
    }

    #[test]
    fn test_empty_payload_still_constructs() {
        let draft = sanitize(json!({}));

        assert_eq!(draft.invoice_number, "Sin número");
        assert_eq!(draft.vendor.name, UNKNOWN_VENDOR);
        assert_eq!(draft.vendor.tax_id, NO_FIGURA);
        assert_eq!(draft.total_amount, Decimal::new(1, 2));
        assert_eq!(draft.currency, "ARS");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.metadata.confidence, Confidence::Low);

        assert!(Invoice::new(draft).is_ok());
    }

    #[test]
    fn test_end_to_end_mangled_payload() {
        // The classic worst case: everything present, everything wrong
        let draft = sanitize(json!({
            "invoiceNumber": "",
            "date": "03/11/2025",
            "vendor": { "name": "ACME", "taxId": "Banco Provincia" },
            "totalAmount": 0,
            "currency": "us",
            "items": []
        }));

        assert_eq!(draft.invoice_number, "Sin número");
        assert_eq!(draft.date, "2025-11-03");
        assert_eq!(draft.vendor.tax_id, NO_FIGURA);
        assert_eq!(draft.total_amount, Decimal::new(1, 2));
        assert_eq!(draft.currency, "ARS");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].subtotal, Decimal::ZERO);

        let invoice = Invoice::new(draft).unwrap();
        assert_eq!(invoice.metadata().confidence, Confidence::Low);
    }

    #[test]
    fn test_total_falls_back_to_item_sum() {
        let draft = sanitize(json!({
            "totalAmount": "no number",
            "items": [
                { "description": "a", "quantity": 2, "unitPrice": 25 },
                { "description": "b", "quantity": 1, "unitPrice": 25 }
            ]
        }));

        assert_eq!(draft.total_amount, Decimal::from_str("75").unwrap());
    }

    #[test]
    fn test_processor_receiver_suppressed() {
        let draft = sanitize(json!({
            "vendor": { "name": "ACME" },
            "receiverBank": "Mercado Pago"
        }));
        assert_eq!(draft.receiver_bank, "");
    }

    #[test]
    fn test_issuer_receiver_replaced_by_vendor() {
        let draft = sanitize(json!({
            "vendor": { "name": "ACME SA" },
            "receiverBank": "Banco Galicia"
        }));
        assert_eq!(draft.receiver_bank, "ACME SA");
    }

    #[test]
    fn test_taxes_require_object_shape() {
        let draft = sanitize(json!({ "taxes": "21%" }));
        assert_eq!(draft.taxes, None);

        let draft = sanitize(json!({ "taxes": { "iva": 21.5, "otherTaxes": -3 } }));
        let taxes = draft.taxes.unwrap();
        assert_eq!(taxes.iva, Decimal::from_str("21.5").unwrap());
        assert_eq!(taxes.other_taxes, Decimal::ZERO);
    }

    #[test]
    fn test_fallbacks_do_not_score() {
        // Date, total and items all genuine vs all fabricated
        let genuine = sanitize(json!({
            "invoiceNumber": "X",
            "date": "2025-01-01",
            "vendor": { "name": "ACME" },
            "totalAmount": 10,
            "items": [{ "description": "a", "quantity": 1, "unitPrice": 10 }]
        }));
        assert_eq!(genuine.metadata.confidence, Confidence::High);

        let fabricated = sanitize(json!({
            "invoiceNumber": "X",
            "date": "mañana",
            "vendor": { "name": "ACME" },
            "totalAmount": -1,
            "items": "none"
        }));
        assert_eq!(fabricated.metadata.confidence, Confidence::Low);
    }

    #[test]
    fn test_custom_defaults() {
        let sanitizer = InvoiceSanitizer::new()
            .with_default_currency("USD")
            .with_item_description("Ítem")
            .with_invoice_number_fallback("S/N");
        let raw = RawExtraction::from_value(json!({}));
        let draft = sanitizer.sanitize(&raw, &SanitizeContext::default());

        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.items[0].description, "Ítem");
        assert_eq!(draft.invoice_number, "S/N");
    }

    #[test]
    fn test_context_flows_into_metadata() {
        let raw = RawExtraction::from_value(json!({}));
        let context = SanitizeContext {
            processing_time_ms: 2500,
            model: Some("gpt-4o-mini".to_string()),
        };
        let draft = InvoiceSanitizer::new().sanitize(&raw, &context);

        assert_eq!(draft.metadata.processing_time_ms, 2500);
        assert_eq!(draft.metadata.model.as_deref(), Some("gpt-4o-mini"));
    }
}
