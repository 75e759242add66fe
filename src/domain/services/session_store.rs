#[cfg(test)]
#[path = "session_store_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Message;

/// Ordered chat log. Insertion order is display order, and messages are never
/// reordered or removed individually.
pub struct SessionStore {
    messages: Vec<Message>,
}

impl SessionStore {
    pub fn new(seed: Message) -> SessionStore {
        return SessionStore {
            messages: vec![seed],
        };
    }

    /// Appends to the tail and returns the new length.
    pub fn append(&mut self, message: Message) -> Result<usize> {
        if message.content().is_empty() && message.media().is_none() {
            bail!("Messages without media must have content");
        }

        self.messages.push(message);
        return Ok(self.messages.len());
    }

    /// Replaces the whole log with a single seed message.
    pub fn reset(&mut self, seed: Message) {
        self.messages = vec![seed];
    }

    pub fn snapshot(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }
}
