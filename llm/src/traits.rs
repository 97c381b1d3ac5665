use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("no credential configured for the completion service")]
    MissingCredential,
    #[error("network error: {0}")]
    Network(String),
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("completion timed out")]
    Timeout,
}

/// A text-completion service: one prompt in, one reply out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit `prompt` and return the reply text.
    ///
    /// `Ok(None)` means the service answered but the payload carried no text.
    async fn complete(&self, prompt: &str) -> Result<Option<String>, LLMError>;

    /// Verify the client has what it needs to make a call.
    fn check_config(&self) -> Result<(), LLMError> {
        Ok(())
    }
}
