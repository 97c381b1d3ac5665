use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use llm::LLMError;
use serde_json::json;
use thiserror::Error;

/// Failures a chat request can end in. Each maps to one HTTP status.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The body was malformed or lacked `messages`/`users`.
    #[error("{0}")]
    BadRequest(String),
    /// The completion service cannot be used with the current configuration.
    #[error("completion service is not configured: {0}")]
    Configuration(String),
    /// The completion call failed, timed out or returned garbage.
    #[error("completion service call failed: {0}")]
    Service(#[from] LLMError),
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl RelayError {
    pub fn missing_fields() -> Self {
        Self::BadRequest("messages and users are required".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::Service(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Reason shown to the caller. Upstream details stay in the logs.
    pub fn reason(&self) -> String {
        match self {
            Self::BadRequest(reason) => reason.clone(),
            Self::Configuration(_) => "completion service is not configured".into(),
            Self::Service(_) => "completion service call failed".into(),
            Self::Unexpected(_) => "internal server error".into(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.reason() }))).into_response()
    }
}
