//! Ordered transcript of the journal conversation.

use serde::{Deserialize, Serialize};

use super::Message;

/// Insertion-ordered chat transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Drops the oldest messages until at most `limit` remain.
    ///
    /// Returns how many were evicted.
    pub fn evict_oldest(&mut self, limit: usize) -> usize {
        let excess = self.messages.len().saturating_sub(limit);
        if excess > 0 {
            self.messages.drain(..excess);
        }
        excess
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
