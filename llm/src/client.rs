//! Completion client for a local Ollama server.
//!
//! [`OllamaClient`] sends a single non-streaming generation request and hands
//! back the full response text.

use crate::traits::{CompletionClient, LLMError};
use async_trait::async_trait;
use tracing::debug;

use ollama_rs::{generation::completion::request::GenerationRequest, Ollama};

pub struct OllamaClient {
    inner: Ollama,
    model: String,
}

impl OllamaClient {
    /// Connect to the Ollama server at `base_url` and use `model` for completions.
    pub fn new(base_url: impl AsRef<str>, model: impl Into<String>) -> Result<Self, LLMError> {
        let inner = Ollama::try_new(base_url.as_ref())
            .map_err(|e| LLMError::Network(format!("invalid ollama url: {e}")))?;
        Ok(Self {
            inner,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, LLMError> {
        let req = GenerationRequest::new(self.model.clone(), prompt.to_string());
        debug!(model = %self.model, "ollama generate");
        let res = self
            .inner
            .generate(req)
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;
        Ok(Some(res.response))
    }
}
