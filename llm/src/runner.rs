//! Build completion clients from environment variables.

use std::sync::Arc;

use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::traits::{CompletionClient, LLMError};
use crate::{GeminiClient, OllamaClient};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma3:27b";

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Read the model name for the backend selected by `CHAT_BACKEND`.
///
/// Uses `OLLAMA_MODEL` for the `ollama` backend and `GEMINI_MODEL` otherwise.
pub fn model_from_env() -> String {
    model_from_vars(read_env)
}

/// Create the client selected by `CHAT_BACKEND` (`gemini` unless set to `ollama`).
///
/// Gemini reads `GOOGLE_API_KEY` and `GEMINI_URL`; Ollama reads `OLLAMA_URL`.
/// A missing Gemini key is not an error here. It surfaces through
/// [`CompletionClient::check_config`].
pub fn client_from_env() -> Result<Arc<dyn CompletionClient>, LLMError> {
    client_from_vars(read_env)
}

fn is_ollama(var: &impl Fn(&str) -> Option<String>) -> bool {
    var("CHAT_BACKEND").is_some_and(|b| b.trim().eq_ignore_ascii_case("ollama"))
}

pub fn model_from_vars(var: impl Fn(&str) -> Option<String>) -> String {
    if is_ollama(&var) {
        var("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.into())
    } else {
        var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into())
    }
}

pub fn client_from_vars(
    var: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn CompletionClient>, LLMError> {
    let model = model_from_vars(&var);
    if is_ollama(&var) {
        let url = var("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.into());
        return Ok(Arc::new(OllamaClient::new(url, model)?));
    }
    let url = var("GEMINI_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
    Ok(Arc::new(
        GeminiClient::new(var("GOOGLE_API_KEY"))
            .with_base_url(url)
            .with_model(model),
    ))
}
