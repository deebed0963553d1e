//! OpenAI-compatible chat-completions backend.
//!
//! Works against any endpoint speaking the `/chat/completions` protocol,
//! which covers OpenAI itself as well as local gateways. Images travel
//! inline as base64 data URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::VisionError;
use crate::payload::parse_model_reply;
use crate::prompt::{text_request, IMAGE_REQUEST, SYSTEM_PROMPT};
use crate::{DocumentSource, ExtractionOutcome, Result, VisionBackend};

/// Default chat-completions endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default extraction model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<Message>,
    response_format: ResponseFormat,
}

// Content is a Value rather than a String: vision requests carry an
// array of content parts, text requests a plain string.
#[derive(Serialize)]
struct Message {
    role: String,
    content: Value,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Extraction backend over an OpenAI-compatible API.
pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiBackend {
    /// Create a backend with the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
        }
    }

    /// Point at a different chat-completions endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn user_message(source: &DocumentSource) -> Message {
        let content = match source {
            DocumentSource::Image { data, mime } => {
                let encoded = STANDARD.encode(data);
                json!([
                    { "type": "text", "text": IMAGE_REQUEST },
                    {
                        "type": "image_url",
                        "image_url": { "url": format!("data:{};base64,{}", mime, encoded) }
                    }
                ])
            }
            DocumentSource::Text(text) => Value::String(text_request(text)),
        };
        Message {
            role: "user".to_string(),
            content,
        }
    }

    async fn call(&self, source: &DocumentSource) -> Result<ExtractionOutcome> {
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: Value::String(SYSTEM_PROMPT.to_string()),
                },
                Self::user_message(source),
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, url = %url, "Sending extraction request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Api { status, body });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(VisionError::EmptyResponse)?;

        let payload = parse_model_reply(content)?;
        Ok(ExtractionOutcome {
            payload,
            model: chat.model,
            raw_content: content.to_string(),
        })
    }
}

impl VisionBackend for OpenAiBackend {
    async fn extract(&self, source: &DocumentSource) -> Result<ExtractionOutcome> {
        self.call(source).await
    }
}
