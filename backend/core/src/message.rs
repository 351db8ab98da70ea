use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ChatError;

/// Canonical on-disk and export form of a timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Conversational role of a message, as understood by chat-completion APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Classify a display sender label.
    ///
    /// `"You"`/`"User"` map to `User`, `"Assistant"`/`"Bot"` to `Assistant`.
    /// Matching is exact and case-sensitive; every other label, including the
    /// empty string, is `System`.
    pub fn from_sender(sender: &str) -> Self {
        match sender {
            "You" | "User" => Role::User,
            "Assistant" | "Bot" => Role::Assistant,
            _ => Role::System,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }

    /// Whether messages with this role belong in a model's context window.
    pub fn is_conversational(&self) -> bool {
        matches!(self, Role::User | Role::Assistant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "system" => Ok(Role::System),
            other => Err(ChatError::UnknownRole(other.to_string())),
        }
    }
}

/// Free-function form of [`Role::from_sender`].
pub fn sender_to_role(sender: &str) -> Role {
    Role::from_sender(sender)
}

/// Second-precision point in time, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Wraps a datetime, dropping any sub-second component.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// `HH:MM:SS`, used by the chat display.
    pub fn time_of_day(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }

    /// `YYYYMMDD_HHMMSS`, used in export file names.
    pub fn file_stamp(&self) -> String {
        self.0.format("%Y%m%d_%H%M%S").to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|_| ChatError::InvalidTimestamp(s.to_string()))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single entry in the chat ledger.
///
/// Immutable once created. The role is derived from the sender when a message
/// is built with [`ChatMessage::new`]; the persisted role is trusted when a
/// message is rebuilt from stored parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    timestamp: Timestamp,
    sender: String,
    text: String,
    role: Role,
}

impl ChatMessage {
    pub fn new(timestamp: Timestamp, sender: impl Into<String>, text: impl Into<String>) -> Self {
        let sender = sender.into();
        let role = Role::from_sender(&sender);
        Self {
            timestamp,
            sender,
            text: text.into(),
            role,
        }
    }

    /// Rebuild a message from previously stored fields without re-deriving
    /// the role.
    pub fn from_parts(
        timestamp: Timestamp,
        sender: impl Into<String>,
        text: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            text: text.into(),
            role,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Sender/text pair appended when a conversation is reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMessage {
    pub sender: String,
    pub text: String,
}

impl SeedMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_classification_table() {
        assert_eq!(sender_to_role("You"), Role::User);
        assert_eq!(sender_to_role("User"), Role::User);
        assert_eq!(sender_to_role("Assistant"), Role::Assistant);
        assert_eq!(sender_to_role("Bot"), Role::Assistant);
        assert_eq!(sender_to_role("System"), Role::System);
        assert_eq!(sender_to_role(""), Role::System);
        assert_eq!(sender_to_role("Anything else"), Role::System);
    }

    #[test]
    fn test_sender_classification_is_case_sensitive() {
        assert_eq!(sender_to_role("you"), Role::System);
        assert_eq!(sender_to_role("ASSISTANT"), Role::System);
        assert_eq!(sender_to_role(" You"), Role::System);
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert!(matches!("tool".parse::<Role>(), Err(ChatError::UnknownRole(r)) if r == "tool"));
    }

    #[test]
    fn test_timestamp_canonical_form() {
        let ts: Timestamp = "2025-11-13 08:05:09".parse().unwrap();
        assert_eq!(ts.to_string(), "2025-11-13 08:05:09");
        assert_eq!(ts.time_of_day(), "08:05:09");
        assert_eq!(ts.file_stamp(), "20251113_080509");
    }

    #[test]
    fn test_timestamp_rejects_other_formats() {
        assert!("2025-11-13T08:05:09".parse::<Timestamp>().is_err());
        assert!("2025-11-13".parse::<Timestamp>().is_err());
        assert!("yesterday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_timestamp_ordering() {
        let a: Timestamp = "2025-11-13 08:05:09".parse().unwrap();
        let b: Timestamp = "2025-11-13 08:05:10".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_from_parts_keeps_stored_role() {
        let ts: Timestamp = "2025-11-13 08:05:09".parse().unwrap();
        let msg = ChatMessage::from_parts(ts, "You", "hi", Role::System);
        assert_eq!(msg.role(), Role::System);
        assert_eq!(ChatMessage::new(ts, "You", "hi").role(), Role::User);
    }

    #[test]
    fn test_message_json_shape() {
        let ts: Timestamp = "2025-11-13 08:05:09".parse().unwrap();
        let msg = ChatMessage::new(ts, "Bot", "hello");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "timestamp": "2025-11-13 08:05:09",
                "sender": "Bot",
                "text": "hello",
                "role": "assistant"
            })
        );
    }
}
