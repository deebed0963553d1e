//! Documents in, extraction payloads out.

use std::path::Path;

use serde_json::Value;

use crate::{Result, VisionError};

/// A document handed to the vision model.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Image bytes with their MIME type.
    Image { data: Vec<u8>, mime: String },

    /// Pre-extracted document text (forwarded receipts, tests).
    Text(String),
}

impl DocumentSource {
    /// Load an image from disk, deriving the MIME type from the extension.
    pub fn from_image_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let mime = match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => {
                return Err(VisionError::UnsupportedDocument(
                    path.display().to_string(),
                ));
            }
        };

        let data = std::fs::read(path)?;
        Ok(Self::Image {
            data,
            mime: mime.to_string(),
        })
    }
}

/// What a backend hands to the sanitization pipeline.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The scraped JSON payload, still fully untrusted.
    pub payload: Value,

    /// Model identifier the backend reported.
    pub model: Option<String>,

    /// The reply text before scraping, kept for replay and debugging.
    pub raw_content: String,
}

/// Scrape a model reply down to its JSON object.
///
/// Models wrap JSON in markdown fences or prose despite instructions.
/// Fences are stripped first; if the remainder still is not valid JSON,
/// the slice between the first `{` and the last `}` gets a second chance.
pub fn parse_model_reply(content: &str) -> Result<Value> {
    let text = strip_code_fences(content);

    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let candidate = extract_json_object(text).ok_or_else(|| {
        VisionError::MalformedPayload("no JSON object in reply".to_string())
    })?;
    serde_json::from_str(candidate).map_err(|e| VisionError::MalformedPayload(e.to_string()))
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") up to the first newline
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim().trim_end_matches("```").trim()
}

fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}
