//! Replay backend serving canned payloads.
//!
//! Stands in for a live model in tests and offline runs: the payload is
//! fixed at construction time and returned for every document.

use serde_json::Value;

use crate::payload::parse_model_reply;
use crate::{DocumentSource, ExtractionOutcome, Result, VisionBackend};

/// Backend that replays a fixed extraction payload.
pub struct ReplayBackend {
    payload: Value,
    model: Option<String>,
}

impl ReplayBackend {
    /// Replay the given payload for every extraction.
    pub fn new(payload: Value) -> Self {
        Self {
            payload,
            model: Some("replay".to_string()),
        }
    }

    /// Report a different model name in outcomes.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Load the payload from a file holding a model reply.
    ///
    /// The file goes through the same reply parsing as live responses,
    /// so fenced or prose-wrapped fixtures work too.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let payload = parse_model_reply(&content)?;
        Ok(Self::new(payload))
    }
}

impl VisionBackend for ReplayBackend {
    async fn extract(&self, _source: &DocumentSource) -> Result<ExtractionOutcome> {
        Ok(ExtractionOutcome {
            payload: self.payload.clone(),
            model: self.model.clone(),
            raw_content: self.payload.to_string(),
        })
    }
}
