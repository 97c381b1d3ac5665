//! HTTP front end for the group-chat relay.
//!
//! [`ChatRelay`] runs each request through the shared history, the prompt
//! builder and the completion client, and [`app`] exposes it over axum.

pub mod config;
pub mod error;
pub mod logging;
pub mod relay;
pub mod web;

pub use config::{Backend, Config};
pub use error::RelayError;
pub use logging::init_logging;
pub use relay::{APOLOGY, ChatRelay, ChatRequest, ChatResponse};
pub use web::{AppState, app};
