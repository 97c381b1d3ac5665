use std::any::Any;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use relay_core::Message;
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{debug, error, warn};

use crate::{ChatRelay, ChatRequest, ChatResponse, RelayError};

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        Self { relay }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

/// `POST /api/chat`: reset the conversation or answer new messages.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let Json(body) = body.map_err(|rejection| {
        warn!(%rejection, "rejected chat body");
        RelayError::BadRequest(rejection.body_text())
    })?;
    let request = ChatRequest::from_json(body)?;
    debug!(
        reset = request.reset.unwrap_or(false),
        messages = request.messages.as_ref().map_or(0, Vec::len),
        "chat request"
    );
    state.relay.handle(request).await.map(Json)
}

/// `GET /api/history`: the current conversation window.
pub async fn history(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.relay.history().snapshot().await)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default();
    error!(%detail, "handler panicked");
    RelayError::Unexpected(detail).into_response()
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/history", get(history))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}
