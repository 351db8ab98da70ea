//! Chat Event Logger
//!
//! Structured chat events (appends, context builds, resets, exports) written
//! through `tracing` at target `chat_events`.

use chatpane_core::{ChatMessage, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatLogEvent {
    MessageAppended {
        sender: String,
        role: Role,
        text: String,
    },
    ContextBuilt {
        limit: i64,
        count: usize,
        dropped: usize,
    },
    HistoryCleared {
        seeded: usize,
    },
    HistoryReplaced {
        count: usize,
    },
    Exported {
        path: String,
        count: usize,
    },
}

impl ChatLogEvent {
    pub fn appended(msg: &ChatMessage) -> Self {
        ChatLogEvent::MessageAppended {
            sender: msg.sender().to_string(),
            role: msg.role(),
            text: msg.text().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub session: String,
    pub timestamp: DateTime<Utc>,
    pub event: ChatLogEvent,
}

pub struct ChatEventLogger;

impl ChatEventLogger {
    /// Build a log entry with message text redacted.
    pub fn entry(session: &str, mut event: ChatLogEvent) -> EventLogEntry {
        if let ChatLogEvent::MessageAppended { text, .. } = &mut event {
            *text = redact_sensitive_data(text);
        }
        EventLogEntry {
            session: session.into(),
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn log_event(session: &str, event: ChatLogEvent) {
        let entry = Self::entry(session, event);
        match serde_json::to_string(&entry) {
            Ok(json) => info!(target: "chat_events", entry = %json, "Chat event"),
            Err(e) => info!(target: "chat_events", error = %e, "Unserializable chat event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatpane_core::Timestamp;

    #[test]
    fn test_appended_event_is_redacted() {
        let ts: Timestamp = "2025-11-13 10:00:00".parse().unwrap();
        let msg = ChatMessage::new(ts, "You", "token: Bearer abc.def.ghi");
        let entry = ChatEventLogger::entry("demo", ChatLogEvent::appended(&msg));
        match &entry.event {
            ChatLogEvent::MessageAppended { sender, role, text } => {
                assert_eq!(sender, "You");
                assert_eq!(*role, Role::User);
                assert!(!text.contains("abc.def.ghi"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_entry_serializes_with_tag() {
        let entry = ChatEventLogger::entry("demo", ChatLogEvent::ContextBuilt { limit: 5, count: 3, dropped: 0 });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["event"]["type"], "context_built");
        assert_eq!(value["event"]["count"], 3);
        assert_eq!(value["session"], "demo");
    }
}
