//! Data models for invoice records and pipeline configuration.

pub mod config;
pub mod invoice;
pub mod raw;

pub use config::BotConfig;
pub use invoice::{Confidence, Invoice, InvoiceDraft, InvoiceItem, Metadata, Taxes, Vendor};
pub use raw::RawExtraction;
