//! HTTP client for Google's Gemini `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::traits::{CompletionClient, LLMError};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// JSON pointer to the first text part of the first candidate.
const REPLY_TEXT: &str = "/candidates/0/content/parts/0/text";

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a client for the public endpoint. A blank `api_key` counts as missing.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn api_key(&self) -> Result<&str, LLMError> {
        self.api_key.as_deref().ok_or(LLMError::MissingCredential)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, LLMError> {
        let key = self.api_key()?;
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        debug!(model = %self.model, chars = prompt.len(), "requesting completion");
        let resp = self
            .http
            .post(self.endpoint())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, %body, "gemini returned an error");
            return Err(LLMError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| LLMError::InvalidResponse(e.to_string()))?;
        Ok(data
            .pointer(REPLY_TEXT)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn check_config(&self) -> Result<(), LLMError> {
        self.api_key().map(|_| ())
    }
}
