//! Validated invoice records produced from sanitized extraction output.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::sanitize::rules::{display_date, format_amount};
use crate::sanitize::rules::patterns::DATE_ISO;

/// Extraction confidence label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Label as stored in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// The party that issued the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Legal or display name, never empty after sanitization.
    pub name: String,

    /// CUIT as printed on the document, or the "No figura" sentinel.
    pub tax_id: String,

    /// Virtual account identifier, when the receipt shows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvu: Option<String>,

    /// Street address, when the document shows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A single line on the invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Product or service description, never empty after sanitization.
    pub description: String,

    /// Quantity, positive.
    pub quantity: Decimal,

    /// Price per unit, non-negative.
    pub unit_price: Decimal,

    /// Always `quantity × unit_price`; model-supplied subtotals are discarded.
    pub subtotal: Decimal,
}

/// Tax breakdown, when the document itemizes taxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxes {
    /// IVA (Argentine VAT) amount.
    pub iva: Decimal,

    /// Everything else: percepciones, municipal taxes, stamp duty.
    pub other_taxes: Decimal,
}

impl Taxes {
    /// Sum of all tax components.
    pub fn total(&self) -> Decimal {
        self.iva + self.other_taxes
    }
}

/// Metadata about how the record was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// When sanitization finished.
    pub processed_at: DateTime<Utc>,

    /// Wall-clock time of the full extraction, in milliseconds.
    pub processing_time_ms: u64,

    /// Confidence label computed by the scorer.
    pub confidence: Confidence,

    /// Identifier of the vision model that produced the raw payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Sanitizer output: invoice-shaped, but not yet validated.
///
/// The sanitizer always produces a draft; whether it survives the entity's
/// invariant gate is a separate question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    pub vendor: Vendor,
    pub total_amount: Decimal,
    pub currency: String,
    pub receiver_bank: String,
    pub items: Vec<InvoiceItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Taxes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    pub metadata: Metadata,
}

/// A validated, immutable invoice record.
///
/// Construction is the validation gate: [`Invoice::new`] checks every
/// invariant in a fixed order and fails fast on the first violation. Fields
/// are private and accessors borrow, so a stored record cannot be mutated;
/// [`Invoice::to_draft`] hands out an owned deep copy for callers that need
/// plain data. Deserialization routes through [`InvoiceDraft`], so a record
/// read from disk passes the same gate as a freshly extracted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "InvoiceDraft")]
pub struct Invoice {
    invoice_number: String,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    operation_type: Option<String>,
    vendor: Vendor,
    total_amount: Decimal,
    currency: String,
    receiver_bank: String,
    items: Vec<InvoiceItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    taxes: Option<Taxes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_method: Option<String>,
    metadata: Metadata,
}

impl Invoice {
    /// Validate a draft and seal it into an `Invoice`.
    ///
    /// Checks run in a fixed order and the first violation wins:
    /// invoice number, date shape, vendor name, total, currency, items.
    pub fn new(draft: InvoiceDraft) -> Result<Self, ValidationError> {
        if draft.invoice_number.trim().is_empty() {
            return Err(ValidationError::EmptyInvoiceNumber);
        }
        if !DATE_ISO.is_match(&draft.date) {
            return Err(ValidationError::MalformedDate(draft.date));
        }
        if draft.vendor.name.trim().is_empty() {
            return Err(ValidationError::EmptyVendorName);
        }
        if draft.total_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveTotal(draft.total_amount));
        }
        if draft.currency.chars().count() != 3 {
            return Err(ValidationError::MalformedCurrency(draft.currency));
        }
        if draft.items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        Ok(Self {
            invoice_number: draft.invoice_number,
            date: draft.date,
            operation_type: draft.operation_type,
            vendor: draft.vendor,
            total_amount: draft.total_amount,
            currency: draft.currency,
            receiver_bank: draft.receiver_bank,
            items: draft.items,
            taxes: draft.taxes,
            payment_method: draft.payment_method,
            metadata: draft.metadata,
        })
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// ISO `YYYY-MM-DD` date as stored.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn operation_type(&self) -> Option<&str> {
        self.operation_type.as_deref()
    }

    pub fn vendor(&self) -> &Vendor {
        &self.vendor
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Beneficiary bank label; empty means unknown or not applicable.
    pub fn receiver_bank(&self) -> &str {
        &self.receiver_bank
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn taxes(&self) -> Option<&Taxes> {
        self.taxes.as_ref()
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Total including itemized taxes, when present.
    pub fn total_with_taxes(&self) -> Decimal {
        match &self.taxes {
            Some(taxes) => self.total_amount + taxes.total(),
            None => self.total_amount,
        }
    }

    /// Date in display form `DD/MM/YYYY`.
    ///
    /// Pure field rearrangement of the stored value, so even a fabricated
    /// but well-shaped date formats cleanly.
    pub fn formatted_date(&self) -> String {
        display_date(&self.date)
    }

    /// Amount with currency in Argentine display style ("ARS 1.234,56").
    pub fn formatted_amount(&self) -> String {
        format_amount(&self.currency, self.total_amount)
    }

    pub fn is_high_confidence(&self) -> bool {
        self.metadata.confidence == Confidence::High
    }

    /// Owned plain-data copy of the whole record.
    pub fn to_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: self.invoice_number.clone(),
            date: self.date.clone(),
            operation_type: self.operation_type.clone(),
            vendor: self.vendor.clone(),
            total_amount: self.total_amount,
            currency: self.currency.clone(),
            receiver_bank: self.receiver_bank.clone(),
            items: self.items.clone(),
            taxes: self.taxes.clone(),
            payment_method: self.payment_method.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

impl TryFrom<InvoiceDraft> for Invoice {
    type Error = ValidationError;

    fn try_from(draft: InvoiceDraft) -> Result<Self, Self::Error> {
        Self::new(draft)
    }
}
