//! The chat ledger: ordered, append-only (until cleared or replaced) history
//! of one chat session.

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::context_window::build_context;
use crate::message::{ChatMessage, SeedMessage};

/// Ordered message history for a single chat session.
///
/// Insertion order is chronological order; callers are trusted to append in
/// time order and the ledger never re-sorts.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory<C = SystemClock> {
    messages: Vec<ChatMessage>,
    clock: C,
}

impl ChatHistory<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> ChatHistory<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            messages: Vec::new(),
            clock,
        }
    }

    /// Stamp, classify and store a new message.
    ///
    /// Empty text is accepted; suppressing blank input is left to the UI.
    pub fn append(&mut self, sender: impl Into<String>, text: impl Into<String>) -> &ChatMessage {
        let msg = ChatMessage::new(self.clock.now(), sender, text);
        debug!(sender = %msg.sender(), role = %msg.role(), "Appending chat message");
        self.messages.push(msg);
        &self.messages[self.messages.len() - 1]
    }

    /// Borrowed view of the full ledger in insertion order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Owned snapshot of the full ledger.
    pub fn get_all(&self) -> Vec<ChatMessage> {
        self.messages.clone()
    }

    /// Install `messages` verbatim, discarding the current ledger.
    pub fn replace_all(&mut self, messages: Vec<ChatMessage>) {
        debug!(previous = self.messages.len(), count = messages.len(), "Replacing chat history");
        self.messages = messages;
    }

    /// Empty the ledger, then append each seed with a fresh timestamp.
    pub fn clear(&mut self, seed: &[SeedMessage]) {
        debug!(dropped = self.messages.len(), seeded = seed.len(), "Clearing chat history");
        self.messages.clear();
        for s in seed {
            self.append(s.sender.as_str(), s.text.as_str());
        }
    }

    /// Most recent `limit` user/assistant messages; non-positive means all.
    pub fn build_context(&self, limit: i64) -> Vec<ChatMessage> {
        build_context(&self.messages, limit)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}
