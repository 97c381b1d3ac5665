//! Clients for text-completion services.
//!
//! The `llm` crate defines the [`CompletionClient`] trait along with concrete
//! implementations: [`GeminiClient`] for Google's `generateContent` API and
//! [`OllamaClient`] for a local Ollama server. [`client_from_env`] picks one
//! of them from environment variables.

pub mod client;
pub mod gemini;
pub mod runner;
pub mod traits;

pub use client::OllamaClient;
pub use gemini::GeminiClient;
pub use runner::{client_from_env, model_from_env};
pub use traits::{CompletionClient, LLMError};
