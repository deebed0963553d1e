//! End-to-end extraction pipeline.
//!
//! Wires a vision backend to the sanitizer and the validation gate:
//! document in, validated [`Invoice`] out. The backend may fail, the
//! sanitizer never does, and `Invoice::new` rejects drafts the fallbacks
//! could not save.

use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use facturabot_vision::{DocumentSource, VisionBackend};

use crate::models::{BotConfig, Invoice, RawExtraction};
use crate::sanitize::{InvoiceSanitizer, SanitizeContext};
use crate::Result;

/// Result of one document extraction.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Validated invoice.
    pub invoice: Invoice,
    /// Raw payload the model produced, before any cleaning.
    pub payload: Value,
    /// Model identifier the backend reported.
    pub model: Option<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Pipeline combining a vision backend with sanitization and validation.
pub struct ExtractionPipeline<B: VisionBackend> {
    backend: B,
    sanitizer: InvoiceSanitizer,
}

impl<B: VisionBackend> ExtractionPipeline<B> {
    /// Create a pipeline with default sanitization settings.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sanitizer: InvoiceSanitizer::new(),
        }
    }

    /// Create a pipeline with sanitization settings from configuration.
    pub fn from_config(backend: B, config: &BotConfig) -> Self {
        Self {
            backend,
            sanitizer: InvoiceSanitizer::from_config(config),
        }
    }

    /// Use a custom sanitizer.
    pub fn with_sanitizer(mut self, sanitizer: InvoiceSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Extract, sanitize and validate a single document.
    ///
    /// Backend failures surface as-is; nothing reaches the sanitizer
    /// without a payload.
    pub async fn process(&self, source: &DocumentSource) -> Result<ExtractionReport> {
        let start = Instant::now();

        let outcome = self.backend.extract(source).await?;
        debug!(model = ?outcome.model, "Backend returned payload");

        let raw = RawExtraction::from_value(outcome.payload.clone());
        let context = SanitizeContext {
            processing_time_ms: start.elapsed().as_millis() as u64,
            model: outcome.model.clone(),
        };

        let draft = self.sanitizer.sanitize(&raw, &context);
        let invoice = Invoice::new(draft)?;

        Ok(ExtractionReport {
            invoice,
            payload: outcome.payload,
            model: outcome.model,
            processing_time_ms: context.processing_time_ms,
        })
    }

    /// Sanitize and validate a payload already in hand.
    ///
    /// Skips the backend entirely, for callers holding previously
    /// captured model output.
    pub fn process_payload(&self, payload: Value) -> Result<ExtractionReport> {
        let start = Instant::now();

        let raw = RawExtraction::from_value(payload.clone());
        let context = SanitizeContext {
            processing_time_ms: start.elapsed().as_millis() as u64,
            model: None,
        };

        let draft = self.sanitizer.sanitize(&raw, &context);
        let invoice = Invoice::new(draft)?;

        Ok(ExtractionReport {
            invoice,
            payload,
            model: None,
            processing_time_ms: context.processing_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;
    use facturabot_vision::{ExtractionOutcome, ReplayBackend, VisionError};
    use serde_json::json;

    struct FailingBackend;

    impl VisionBackend for FailingBackend {
        async fn extract(
            &self,
            _source: &DocumentSource,
        ) -> facturabot_vision::Result<ExtractionOutcome> {
            Err(VisionError::EmptyResponse)
        }
    }

    fn complete_payload() -> Value {
        json!({
            "invoiceNumber": "0001-00012345",
            "date": "15/03/2025",
            "operationType": "Transferencia",
            "vendor": {
                "name": "Electro Hogar SA",
                "taxId": "30-71675728-1"
            },
            "totalAmount": 125000.0,
            "currency": "ARS",
            "receiverBank": "Positivo SRL",
            "items": [
                { "description": "Heladera", "quantity": 1, "unitPrice": 125000.0 }
            ],
            "taxes": { "iva": 21000.0, "otherTaxes": 0.0 },
            "paymentMethod": "Transferencia"
        })
    }

    #[tokio::test]
    async fn test_process_replay_end_to_end() {
        let pipeline = ExtractionPipeline::new(ReplayBackend::new(complete_payload()));
        let source = DocumentSource::Text(String::new());

        let report = pipeline.process(&source).await.unwrap();
        assert_eq!(report.invoice.invoice_number(), "0001-00012345");
        assert_eq!(report.invoice.date(), "2025-03-15");
        assert_eq!(report.invoice.metadata().confidence, Confidence::High);
        assert_eq!(report.model.as_deref(), Some("replay"));
        assert_eq!(report.payload["vendor"]["name"], "Electro Hogar SA");
    }

    #[tokio::test]
    async fn test_backend_failure_short_circuits() {
        let pipeline = ExtractionPipeline::new(FailingBackend);
        let source = DocumentSource::Text(String::new());

        let err = pipeline.process(&source).await.unwrap_err();
        assert!(matches!(err, crate::FacturaError::Vision(_)));
    }

    #[test]
    fn test_process_payload_recovers_garbage() {
        let pipeline = ExtractionPipeline::new(ReplayBackend::new(json!({})));

        let report = pipeline
            .process_payload(json!({ "totalAmount": "mucho", "items": 7 }))
            .unwrap();
        assert_eq!(report.invoice.invoice_number(), "Sin número");
        assert_eq!(report.invoice.metadata().confidence, Confidence::Low);
        assert!(report.model.is_none());
    }

    #[test]
    fn test_config_settings_flow_through() {
        let mut config = BotConfig::default();
        config.extraction.fallback_invoice_number = "N/D".to_string();

        let pipeline =
            ExtractionPipeline::from_config(ReplayBackend::new(json!({})), &config);
        let report = pipeline.process_payload(json!({})).unwrap();
        assert_eq!(report.invoice.invoice_number(), "N/D");
    }
}
