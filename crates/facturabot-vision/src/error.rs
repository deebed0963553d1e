//! Error types for the vision layer.

use thiserror::Error;

/// Errors that can occur while obtaining a raw extraction payload.
#[derive(Error, Debug)]
pub enum VisionError {
    /// Transport-level HTTP failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The reply carried no usable content.
    #[error("model returned no content")]
    EmptyResponse,

    /// The reply's content held no parseable JSON object.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Document type this backend cannot send.
    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),

    /// I/O error reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
