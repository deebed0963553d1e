//! Vision-model extraction layer for facturabot.
//!
//! This crate provides a unified interface for turning invoice documents
//! into raw JSON payloads across different backends:
//! - `OpenAiBackend` against any OpenAI-compatible chat-completions API
//! - `ReplayBackend` serving canned payloads for tests and offline runs
//!
//! Backends only transport and decode. Cleaning the extracted values is
//! the caller's job.

mod backend;
mod error;
mod payload;
mod prompt;

pub use backend::openai::OpenAiBackend;
pub use backend::replay::ReplayBackend;
pub use backend::VisionBackend;
pub use error::VisionError;
pub use payload::{parse_model_reply, DocumentSource, ExtractionOutcome};
pub use prompt::SYSTEM_PROMPT;

/// Result type for vision operations.
pub type Result<T> = std::result::Result<T, VisionError>;
