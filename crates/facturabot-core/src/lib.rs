//! Core library for invoice chat-bot response sanitization.
//!
//! This crate provides:
//! - Field normalizers taming raw vision-model output (dates, amounts,
//!   CUIT tax IDs, currencies, line items, receiver banks)
//! - An invoice sanitizer that always yields a structurally complete draft
//! - A validated `Invoice` entity with fail-fast construction checks
//! - Confidence scoring over which fields genuinely came from the document
//! - Session storage, access control and spreadsheet export for the bot

pub mod access;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod sanitize;
pub mod session;

pub use error::{FacturaError, Result, ValidationError};
pub use extract::{ExtractionPipeline, ExtractionReport};
pub use models::{
    BotConfig, Confidence, Invoice, InvoiceDraft, InvoiceItem, Metadata, RawExtraction, Taxes,
    Vendor,
};
pub use sanitize::{FieldSurvey, InvoiceSanitizer, SanitizeContext};
pub use session::SessionStore;

/// Re-export vision types.
pub use facturabot_vision::{
    DocumentSource, ExtractionOutcome, OpenAiBackend, ReplayBackend, VisionBackend, VisionError,
};
