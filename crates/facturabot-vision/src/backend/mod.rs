//! Vision backend abstraction.

use std::future::Future;

use crate::{DocumentSource, ExtractionOutcome, Result};

pub mod openai;
pub mod replay;

/// A model backend that turns a document into a raw extraction payload.
///
/// Implementations only transport and decode; they never clean values.
/// Field normalization happens downstream, so a backend is free to return
/// whatever the model produced as long as it is a JSON object.
pub trait VisionBackend: Send + Sync {
    /// Run one extraction over a single document.
    fn extract(
        &self,
        source: &DocumentSource,
    ) -> impl Future<Output = Result<ExtractionOutcome>> + Send;
}
