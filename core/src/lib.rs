//! Conversation state and prompt assembly for the group-chat relay.
//!
//! A [`HistoryStore`] keeps the bounded window of recent [`Message`]s shared by
//! every request, and [`PromptBuilder`] turns that window plus the request's
//! [`Participant`] roster into the text sent to the completion service.
//!
//! ```
//! use relay_core::{HistoryStore, InMemoryHistory, Message, Participant, build_prompt};
//!
//! # async fn demo() {
//! let history = InMemoryHistory::default();
//! let window = history
//!     .append(vec![Message::new("m1", "u1", "Hi", 0)])
//!     .await;
//! let prompt = build_prompt(&window, &[Participant::human("u1", "Alice")]);
//! assert!(prompt.contains("Alice: Hi"));
//! # }
//! ```

pub mod history;
pub mod prompt_builder;
pub mod types;

pub use history::{HistoryStore, InMemoryHistory, MAX_HISTORY};
pub use prompt_builder::{build_prompt, PromptBuilder, ASSISTANT_CUE, UNKNOWN_AUTHOR};
pub use types::{Message, Participant, Role, ASSISTANT_ID};
