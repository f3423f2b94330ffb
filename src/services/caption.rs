//! Period-style captions for converted images.
//!
//! Captions are decoration. Every failure is logged and replaced with a
//! fixed message; nothing here can fail a conversion.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use serde_json::{json, Value};

use crate::error::CaptionError;
use crate::models::CaptionConfig;

/// Shown when the caption service cannot be reached or errors.
pub const FALLBACK_CAPTION: &str =
    "Could not retrieve analysis from the mainframe. Communication link severed.";

/// Shown when the service answers without any text.
pub const EMPTY_CAPTION: &str = "No analysis available.";

/// Source of short descriptive texts for a dithered image.
#[async_trait]
pub trait CaptionService: Send + Sync {
    /// Describe a PNG rendered in the style of `system_name`.
    async fn describe(&self, png: &[u8], system_name: &str) -> Result<String, CaptionError>;
}

/// Instruction sent along with the image.
pub fn caption_prompt(system_name: &str) -> String {
    format!(
        "I have converted an image to the style of the {system_name}. \
         Please analyze this image content and describe how a user from that era \
         (e.g., 1980s or early 1990s) might describe this \"game graphic\" or \"digital art\". \
         Be creative, roleplay a bit as a magazine reviewer from that time. \
         Keep it under 100 words."
    )
}

/// Ask `service` for a caption, never failing.
pub async fn describe_or_fallback(
    service: &dyn CaptionService,
    png: &[u8],
    system_name: &str,
) -> String {
    match service.describe(png, system_name).await {
        Ok(text) => text,
        Err(CaptionError::MissingText) => {
            tracing::debug!("Caption service returned no text");
            EMPTY_CAPTION.to_string()
        }
        Err(e) => {
            tracing::warn!(%e, system = system_name, "Caption request failed");
            FALLBACK_CAPTION.to_string()
        }
    }
}

/// Client for a `generateContent`-style multimodal endpoint.
pub struct HttpCaptionService {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl HttpCaptionService {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CaptionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build from configuration, reading the API key from the configured
    /// environment variable.
    pub fn from_config(config: &CaptionConfig) -> Result<Self, CaptionError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            CaptionError::NotConfigured(format!("{} is not set", config.api_key_env))
        })?;
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Request body carrying the image inline.
pub fn request_body(png: &[u8], system_name: &str) -> Value {
    let data = base64::engine::general_purpose::STANDARD.encode(png);
    json!({
        "contents": [{
            "parts": [
                { "inline_data": { "mime_type": "image/png", "data": data } },
                { "text": caption_prompt(system_name) }
            ]
        }]
    })
}

/// Concatenated text parts of the first candidate.
pub fn response_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait]
impl CaptionService for HttpCaptionService {
    async fn describe(&self, png: &[u8], system_name: &str) -> Result<String, CaptionError> {
        let body = request_body(png, system_name).to_string();

        tracing::debug!(url = %self.url(), bytes = png.len(), "Requesting caption");
        let response = self
            .client
            .post(self.url())
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptionError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|_| CaptionError::MissingText)?;
        response_text(&value).ok_or(CaptionError::MissingText)
    }
}
