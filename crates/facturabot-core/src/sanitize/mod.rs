//! Response sanitization: normalizers, confidence scoring, and the
//! sanitizer that composes them.

pub mod confidence;
pub mod rules;
pub mod sanitizer;

pub use confidence::FieldSurvey;
pub use sanitizer::{InvoiceSanitizer, SanitizeContext};
