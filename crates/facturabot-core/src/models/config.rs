//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the facturabot pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Sanitization defaults.
    pub extraction: ExtractionConfig,

    /// Bank name directories for receiver-bank cleanup.
    pub banks: BanksConfig,

    /// Session lifetime settings.
    pub session: SessionConfig,

    /// Access control settings.
    pub access: AccessConfig,

    /// Vision backend settings.
    pub vision: VisionConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            banks: BanksConfig::default(),
            session: SessionConfig::default(),
            access: AccessConfig::default(),
            vision: VisionConfig::default(),
        }
    }
}

/// Sanitization defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency assumed when the model reports none.
    pub default_currency: String,

    /// Description used for synthesized or undescribed line items.
    pub default_item_description: String,

    /// Placeholder when the document shows no invoice number.
    pub fallback_invoice_number: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_currency: "ARS".to_string(),
            default_item_description: "Sin descripción".to_string(),
            fallback_invoice_number: "Sin número".to_string(),
        }
    }
}

/// Bank name directories.
///
/// Empty lists fall back to the built-in Argentine directory; a deployment
/// that wants to disable issuer substitution sets `issuers` to a single
/// unmatchable entry or overrides both lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BanksConfig {
    /// Payment processors, suppressed from the receiver-bank field.
    pub processors: Vec<String>,

    /// Issuer banks, replaced by the vendor name when misattributed.
    pub issuers: Vec<String>,
}

/// Session lifetime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Minutes a user session survives without activity.
    pub ttl_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_minutes: 30 }
    }
}

/// Access control settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// User ids allowed to use the bot. Empty means open access.
    pub allowed_users: Vec<i64>,

    /// Per-user request cap per minute.
    pub max_requests_per_minute: u32,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            allowed_users: Vec::new(),
            max_requests_per_minute: 10,
        }
    }
}

/// Vision backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Chat-completions endpoint base URL.
    pub base_url: String,

    /// Model identifier sent with each request.
    pub model: String,

    /// Environment variable holding the API key.
    pub api_key_env: String,

    /// Sampling temperature; extraction wants determinism.
    pub temperature: f32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.0,
        }
    }
}

impl BotConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Build the bank directory from config, or the built-in default when
    /// both lists are empty.
    pub fn bank_directory(&self) -> crate::sanitize::rules::BankDirectory {
        if self.banks.processors.is_empty() && self.banks.issuers.is_empty() {
            crate::sanitize::rules::BankDirectory::argentine()
        } else {
            crate::sanitize::rules::BankDirectory::new(
                self.banks.processors.clone(),
                self.banks.issuers.clone(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.extraction.default_currency, "ARS");
        assert_eq!(config.extraction.default_item_description, "Sin descripción");
        assert_eq!(config.session.ttl_minutes, 30);
        assert!(config.access.allowed_users.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: BotConfig =
            serde_json::from_str(r#"{ "session": { "ttl_minutes": 5 } }"#).unwrap();
        assert_eq!(config.session.ttl_minutes, 5);
        assert_eq!(config.extraction.default_currency, "ARS");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = BotConfig::default();
        config.session.ttl_minutes = 5;
        config.vision.model = "gpt-4o".to_string();
        config.banks.issuers = vec!["Banco Sol".to_string()];
        config.save(&path).unwrap();

        let loaded = BotConfig::from_file(&path).unwrap();
        assert_eq!(loaded.session.ttl_minutes, 5);
        assert_eq!(loaded.vision.model, "gpt-4o");
        assert_eq!(loaded.banks.issuers, vec!["Banco Sol".to_string()]);
        assert_eq!(loaded.extraction.default_currency, "ARS");
    }

    #[test]
    fn test_bank_directory_falls_back_to_builtin() {
        let config = BotConfig::default();
        assert!(config.bank_directory().is_processor("Mercado Pago"));

        let mut custom = BotConfig::default();
        custom.banks.processors = vec!["Naranja X".to_string()];
        let directory = custom.bank_directory();
        assert!(directory.is_processor("Naranja X"));
        assert!(!directory.is_processor("Mercado Pago"));
    }
}
