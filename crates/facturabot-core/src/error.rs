//! Error types for the facturabot-core library.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the facturabot library.
#[derive(Error, Debug)]
pub enum FacturaError {
    /// Invoice invariant violated at construction.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Vision backend failure, reported before sanitization runs.
    #[error("vision error: {0}")]
    Vision(#[from] facturabot_vision::VisionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Invoice invariant violations, one variant per ordered construction check.
///
/// Fail-fast: construction reports the first violated invariant, not all of
/// them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invoice number is empty after trimming.
    #[error("invoice number is empty")]
    EmptyInvoiceNumber,

    /// Date is not shaped `YYYY-MM-DD`.
    #[error("date {0:?} is not in YYYY-MM-DD format")]
    MalformedDate(String),

    /// Vendor name is empty after trimming.
    #[error("vendor name is empty")]
    EmptyVendorName,

    /// Total amount is zero or negative.
    #[error("total amount {0} is not positive")]
    NonPositiveTotal(Decimal),

    /// Currency is not exactly three characters.
    #[error("currency {0:?} is not a 3-character code")]
    MalformedCurrency(String),

    /// Item list is empty.
    #[error("invoice has no items")]
    NoItems,
}

impl ValidationError {
    /// The offending field, in the record's serialized naming.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyInvoiceNumber => "invoiceNumber",
            ValidationError::MalformedDate(_) => "date",
            ValidationError::EmptyVendorName => "vendor",
            ValidationError::NonPositiveTotal(_) => "totalAmount",
            ValidationError::MalformedCurrency(_) => "currency",
            ValidationError::NoItems => "items",
        }
    }
}

/// Result type for the facturabot library.
pub type Result<T> = std::result::Result<T, FacturaError>;
