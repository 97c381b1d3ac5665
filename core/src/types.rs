use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author id used for every message the assistant produces.
pub const ASSISTANT_ID: &str = "ai";

/// Kind of actor taking part in a conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    Human,
    #[serde(rename = "ai")]
    Assistant,
}

/// Someone named in the roster sent along with each request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(rename = "name", alias = "displayName")]
    pub display_name: String,
    pub role: Role,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Shorthand for a [`Role::Human`] participant.
    pub fn human(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(id, display_name, Role::Human)
    }
}

/// A single chat line. Never modified after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier of the message.
    pub id: String,
    /// Id of the [`Participant`] who wrote it.
    #[serde(rename = "userId", alias = "authorId")]
    pub author_id: String,
    /// Text of the message.
    pub content: String,
    /// Millisecond timestamp when the message was written.
    #[serde(rename = "timestamp", alias = "createdAt")]
    pub created_at: i64,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        content: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            content: content.into(),
            created_at,
        }
    }

    /// Create a message authored by the assistant, stamped with a fresh id
    /// and the current time.
    pub fn from_assistant(content: impl Into<String>) -> Self {
        Self::new(
            format!("msg-{}", Uuid::new_v4()),
            ASSISTANT_ID,
            content,
            Utc::now().timestamp_millis(),
        )
    }
}
