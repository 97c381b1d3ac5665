//! Bounded conversation history shared between requests.
//!
//! [`HistoryStore`] is the seam the relay talks to. [`InMemoryHistory`] keeps
//! the most recent messages in process memory and drops the oldest ones once
//! the configured capacity is exceeded.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::Message;

/// Number of messages kept when no capacity is given.
pub const MAX_HISTORY: usize = 15;

/// Storage for the conversation window.
///
/// Every method is a single atomic step. Callers must not expect two calls to
/// be adjacent when other requests share the same store.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Drop every stored message.
    async fn reset(&self);

    /// Append `messages` in order, evict the oldest entries beyond the
    /// capacity and return the resulting window.
    async fn append(&self, messages: Vec<Message>) -> Vec<Message>;

    /// Current window, oldest first.
    async fn snapshot(&self) -> Vec<Message>;

    /// Maximum number of messages retained.
    fn capacity(&self) -> usize;

    async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Process-local [`HistoryStore`].
#[derive(Debug)]
pub struct InMemoryHistory {
    log: Mutex<Vec<Message>>,
    capacity: usize,
}

impl InMemoryHistory {
    /// Create an empty store holding at most `capacity` messages.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistory {
    async fn reset(&self) {
        let mut log = self.log.lock().await;
        debug!(dropped = log.len(), "history reset");
        log.clear();
    }

    async fn append(&self, messages: Vec<Message>) -> Vec<Message> {
        let mut log = self.log.lock().await;
        log.extend(messages);
        let excess = log.len().saturating_sub(self.capacity);
        if excess > 0 {
            log.drain(..excess);
            debug!(evicted = excess, "history trimmed");
        }
        log.clone()
    }

    async fn snapshot(&self) -> Vec<Message> {
        self.log.lock().await.clone()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    async fn len(&self) -> usize {
        self.log.lock().await.len()
    }
}
