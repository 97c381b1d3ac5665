//! Request orchestration: history update, prompt rendering and completion.

use std::sync::Arc;
use std::time::Duration;

use llm::{CompletionClient, LLMError};
use relay_core::{HistoryStore, Message, Participant, PromptBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::RelayError;

/// Reply used when the service answers without any text.
pub const APOLOGY: &str = "Sorry, I can't answer right now.";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of `POST /api/chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub reset: Option<bool>,
    pub messages: Option<Vec<Message>>,
    pub users: Option<Vec<Participant>>,
}

impl ChatRequest {
    /// Parse a raw JSON body.
    ///
    /// A `reset: true` body is accepted whatever else it contains.
    pub fn from_json(body: Value) -> Result<Self, RelayError> {
        if body.get("reset").and_then(Value::as_bool) == Some(true) {
            return Ok(Self::reset());
        }
        serde_json::from_value(body).map_err(|e| RelayError::BadRequest(e.to_string()))
    }

    pub fn reset() -> Self {
        Self {
            reset: Some(true),
            ..Default::default()
        }
    }

    pub fn chat(messages: Vec<Message>, users: Vec<Participant>) -> Self {
        Self {
            reset: None,
            messages: Some(messages),
            users: Some(users),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Reset { success: bool },
    Reply { message: Message },
}

/// Runs chat requests against a shared history and a completion service.
#[derive(Clone)]
pub struct ChatRelay {
    history: Arc<dyn HistoryStore>,
    completion: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl ChatRelay {
    pub fn new(history: Arc<dyn HistoryStore>, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            history,
            completion,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound on a single completion call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn history(&self) -> &Arc<dyn HistoryStore> {
        &self.history
    }

    pub fn completion(&self) -> &Arc<dyn CompletionClient> {
        &self.completion
    }

    pub async fn reset(&self) {
        self.history.reset().await;
        info!("conversation reset");
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, RelayError> {
        if request.reset == Some(true) {
            self.reset().await;
            return Ok(ChatResponse::Reset { success: true });
        }
        let (Some(messages), Some(users)) = (request.messages, request.users) else {
            return Err(RelayError::missing_fields());
        };
        self.completion
            .check_config()
            .map_err(|e| RelayError::Configuration(e.to_string()))?;

        let window = self.history.append(messages).await;
        debug!(len = window.len(), "history updated");

        let prompt = PromptBuilder::new().history(window).roster(users).build();
        let reply = self.complete(&prompt).await?;

        let text = reply
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| APOLOGY.to_string());
        let message = Message::from_assistant(text.trim());
        self.history.append(vec![message.clone()]).await;
        debug!(id = %message.id, "assistant replied");
        Ok(ChatResponse::Reply { message })
    }

    async fn complete(&self, prompt: &str) -> Result<Option<String>, RelayError> {
        match tokio::time::timeout(self.timeout, self.completion.complete(prompt)).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(e)) => {
                error!(error = %e, "completion failed");
                Err(e.into())
            }
            Err(_) => {
                error!(timeout = ?self.timeout, "completion timed out");
                Err(LLMError::Timeout.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::{ASSISTANT_ID, InMemoryHistory};
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays canned outcomes and records every prompt it sees.
    struct Scripted {
        replies: Mutex<Vec<Result<Option<String>, LLMError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<Option<String>, LLMError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for Scripted {
        async fn complete(&self, prompt: &str) -> Result<Option<String>, LLMError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn relay(completion: Arc<Scripted>) -> (ChatRelay, Arc<InMemoryHistory>) {
        let history = Arc::new(InMemoryHistory::default());
        (ChatRelay::new(history.clone(), completion), history)
    }

    fn alice_says(content: &str) -> ChatRequest {
        ChatRequest::chat(
            vec![Message::new("m1", "u1", content, 1)],
            vec![
                Participant::human("u1", "Alice"),
                Participant::human("u2", "Bob"),
            ],
        )
    }

    #[tokio::test]
    async fn reply_is_trimmed_and_recorded() {
        let llm = Scripted::new(vec![Ok(Some("  Hi Alice!  \n".into()))]);
        let (relay, history) = relay(llm.clone());
        let ChatResponse::Reply { message } = relay.handle(alice_says("Hi")).await.unwrap() else {
            panic!("expected a reply");
        };
        assert_eq!(message.content, "Hi Alice!");
        assert_eq!(message.author_id, ASSISTANT_ID);

        let window = history.snapshot().await;
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].content, "Hi");
        assert_eq!(window[1], message);

        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("Alice: Hi"));
        assert!(prompts[0].contains("Participants: Alice, Bob"));
    }

    #[tokio::test]
    async fn assistant_reply_shows_up_in_next_prompt() {
        let llm = Scripted::new(vec![Ok(Some("Hello".into())), Ok(Some("Sure".into()))]);
        let (relay, _) = relay(llm.clone());
        relay.handle(alice_says("Hi")).await.unwrap();
        relay.handle(alice_says("Help?")).await.unwrap();
        let prompts = llm.prompts.lock().unwrap();
        // "ai" is not in the roster, so the reply renders with the placeholder
        assert!(prompts[1].contains("Alice: Hi\nUnknown: Hello\nAlice: Help?"));
    }

    #[tokio::test]
    async fn missing_text_becomes_apology() {
        for reply in [None, Some(String::new())] {
            let (relay, history) = relay(Scripted::new(vec![Ok(reply)]));
            let ChatResponse::Reply { message } = relay.handle(alice_says("Hi")).await.unwrap()
            else {
                panic!("expected a reply");
            };
            assert_eq!(message.content, APOLOGY);
            assert_eq!(history.len().await, 2);
        }
    }

    #[tokio::test]
    async fn whitespace_reply_is_kept_empty() {
        let (relay, history) = relay(Scripted::new(vec![Ok(Some("   ".into()))]));
        let ChatResponse::Reply { message } = relay.handle(alice_says("Hi")).await.unwrap() else {
            panic!("expected a reply");
        };
        assert_eq!(message.content, "");
        assert_eq!(history.snapshot().await[1], message);
    }

    #[tokio::test]
    async fn service_failure_keeps_human_messages() {
        let llm = Scripted::new(vec![Err(LLMError::Status {
            status: 500,
            body: "down".into(),
        })]);
        let (relay, history) = relay(llm);
        let err = relay.handle(alice_says("Anyone?")).await.unwrap_err();
        assert!(matches!(err, RelayError::Service(LLMError::Status { .. })));
        let window = history.snapshot().await;
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].content, "Anyone?");
    }

    #[tokio::test]
    async fn missing_fields_are_rejected_without_mutation() {
        let (relay, history) = relay(Scripted::new(vec![]));
        let request = ChatRequest {
            messages: Some(vec![Message::new("m1", "u1", "Hi", 1)]),
            ..Default::default()
        };
        assert!(matches!(
            relay.handle(request).await,
            Err(RelayError::BadRequest(_))
        ));
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn reset_clears_history() {
        let (relay, history) = relay(Scripted::new(vec![Ok(Some("ok".into()))]));
        relay.handle(alice_says("Hi")).await.unwrap();
        let response = relay.handle(ChatRequest::reset()).await.unwrap();
        assert_eq!(response, ChatResponse::Reset { success: true });
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn timeout_is_service_failure() {
        struct Stalled;

        #[async_trait]
        impl CompletionClient for Stalled {
            async fn complete(&self, _: &str) -> Result<Option<String>, LLMError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Some("too late".into()))
            }
        }

        let history = Arc::new(InMemoryHistory::default());
        let relay = ChatRelay::new(history.clone(), Arc::new(Stalled))
            .with_timeout(Duration::from_millis(20));
        let err = relay.handle(alice_says("Hi")).await.unwrap_err();
        assert!(matches!(err, RelayError::Service(LLMError::Timeout)));
        assert_eq!(history.len().await, 1);
    }

    #[test]
    fn reset_body_ignores_other_fields() {
        let request = ChatRequest::from_json(json!({ "reset": true, "users": "nonsense" })).unwrap();
        assert_eq!(request.reset, Some(true));
    }

    #[test]
    fn malformed_roster_is_bad_request() {
        let body = json!({
            "messages": [],
            "users": [{ "id": "u1", "name": "Alice", "role": "wizard" }]
        });
        assert!(matches!(
            ChatRequest::from_json(body),
            Err(RelayError::BadRequest(_))
        ));
    }
}
