use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use llm::{CompletionClient, GeminiClient, LLMError, OllamaClient};
use relay_core::{InMemoryHistory, MAX_HISTORY};

use crate::ChatRelay;

/// Which completion service answers chat requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Gemini,
    Ollama,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Group chat relay for a text-completion model")]
pub struct Config {
    /// Address to bind the HTTP server
    #[arg(long, env = "CHAT_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// Completion service to use
    #[arg(long, env = "CHAT_BACKEND", value_enum, default_value_t = Backend::Gemini)]
    pub backend: Backend,

    /// Gemini API key. Chat requests fail with a configuration error while unset.
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = llm::gemini::DEFAULT_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_URL", default_value = llm::gemini::DEFAULT_BASE_URL)]
    pub gemini_url: String,

    #[arg(long, env = "OLLAMA_URL", default_value = llm::runner::DEFAULT_OLLAMA_URL)]
    pub ollama_url: String,

    #[arg(long, env = "OLLAMA_MODEL", default_value = llm::runner::DEFAULT_OLLAMA_MODEL)]
    pub ollama_model: String,

    /// Number of messages kept in the conversation window
    #[arg(long, env = "CHAT_HISTORY_LEN", default_value_t = MAX_HISTORY)]
    pub history_len: usize,

    /// Seconds to wait for a completion before giving up
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Config {
    pub fn completion_client(&self) -> Result<Arc<dyn CompletionClient>, LLMError> {
        Ok(match self.backend {
            Backend::Gemini => Arc::new(
                GeminiClient::new(self.api_key.clone())
                    .with_base_url(&self.gemini_url)
                    .with_model(&self.gemini_model),
            ),
            Backend::Ollama => Arc::new(OllamaClient::new(&self.ollama_url, &self.ollama_model)?),
        })
    }

    pub fn relay(&self) -> Result<ChatRelay, LLMError> {
        let history = Arc::new(InMemoryHistory::new(self.history_len));
        Ok(ChatRelay::new(history, self.completion_client()?)
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}
