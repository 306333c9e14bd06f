use crate::media::encode_base64;
use crate::ports::{Generator, ImageInput};
use async_trait::async_trait;
use paradero_core::error::{ParaderoError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini `generateContent` client
pub struct GeminiClient {
    /// Base URL up to and excluding `/models`
    api_base: String,

    model: String,

    /// `None` when the key is not configured; calls then fail
    api_key: Option<String>,

    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(model: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ParaderoError::upstream("Gemini", format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: GEMINI_API_BASE.to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client,
        })
    }

    /// Create with the key from `GEMINI_API_KEY`
    pub fn from_env(model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok();
        if api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            tracing::warn!("{} not set, AI calls will fail", API_KEY_ENV);
        }
        Self::new(model, api_key, timeout)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str, images: &[ImageInput]) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| ParaderoError::ConfigMissing {
            key: API_KEY_ENV.to_string(),
        })?;

        let request = GeminiRequest::new(prompt, images);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ParaderoError::upstream("Gemini", format!("Failed to reach Gemini: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ParaderoError::upstream(
                "Gemini",
                format!("Gemini API error ({}): {}", status, error_text),
            ));
        }

        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ParaderoError::upstream("Gemini", format!("Failed to parse Gemini response: {}", e)))?;

        let text = body.text().ok_or_else(|| {
            ParaderoError::upstream("Gemini", "Gemini returned no text candidates")
        })?;

        tracing::debug!(model = %self.model, images = images.len(), chars = text.len(), "Gemini response received");
        Ok(text)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body for the generateContent API
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

impl GeminiRequest {
    /// One user turn: the prompt text first, then each image inline
    fn new(prompt: &str, images: &[ImageInput]) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        parts.extend(images.iter().map(|image| Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: encode_base64(&image.data),
            },
        }));
        Self {
            contents: vec![Content { parts }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Response from the generateContent API
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Text parts of the first candidate, joined
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}
