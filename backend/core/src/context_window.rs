//! Context windowing: the bounded, role-filtered tail of a chat ledger that
//! is handed to a language model.

use crate::message::ChatMessage;

/// Result of windowing a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    pub messages: Vec<ChatMessage>,
    /// Conversational messages that fell outside the window.
    pub dropped: usize,
}

impl ContextWindow {
    /// Keep only user/assistant messages, then the most recent `limit` of them.
    ///
    /// A non-positive `limit` means unbounded. The count applies to the
    /// filtered messages, so interleaved system notices never use up room.
    pub fn build(transcript: &[ChatMessage], limit: i64) -> Self {
        let conversational: Vec<&ChatMessage> = transcript
            .iter()
            .filter(|m| m.role().is_conversational())
            .collect();

        let total = conversational.len();
        let keep = match usize::try_from(limit) {
            Ok(limit) if limit > 0 => limit.min(total),
            _ => total,
        };
        let dropped = total - keep;

        Self {
            messages: conversational[dropped..].iter().map(|m| (*m).clone()).collect(),
            dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}

/// Build the context window for `transcript`. See [`ContextWindow::build`].
pub fn build_context(transcript: &[ChatMessage], limit: i64) -> Vec<ChatMessage> {
    ContextWindow::build(transcript, limit).into_messages()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Role, Timestamp};

    fn transcript(entries: &[(&str, &str)]) -> Vec<ChatMessage> {
        let start: Timestamp = "2025-10-25 12:00:00".parse().unwrap();
        entries
            .iter()
            .enumerate()
            .map(|(i, (sender, text))| {
                let ts = Timestamp::from_datetime(
                    start.as_datetime() + chrono::Duration::seconds(i as i64),
                );
                ChatMessage::new(ts, *sender, *text)
            })
            .collect()
    }

    fn pairs(messages: &[ChatMessage]) -> Vec<(&str, &str)> {
        messages.iter().map(|m| (m.sender(), m.text())).collect()
    }

    #[test]
    fn test_window_drops_system_and_oldest() {
        let t = transcript(&[
            ("You", "Hello"),
            ("Assistant", "Hi there"),
            ("System", "Note"),
            ("You", "How are you"),
            ("Assistant", "Fine"),
        ]);
        let ctx = build_context(&t, 2);
        assert_eq!(pairs(&ctx), vec![("You", "How are you"), ("Assistant", "Fine")]);
    }

    #[test]
    fn test_non_positive_limit_is_unbounded() {
        let t = transcript(&[
            ("System", "Welcome"),
            ("You", "a"),
            ("Bot", "b"),
            ("User", "c"),
            ("Nobody", "d"),
        ]);
        for limit in [0, -1, -100] {
            let ctx = build_context(&t, limit);
            assert_eq!(pairs(&ctx), vec![("You", "a"), ("Bot", "b"), ("User", "c")]);
        }
    }

    #[test]
    fn test_limit_counts_filtered_messages_only() {
        let mut entries = vec![("You", "first"), ("Assistant", "second")];
        entries.extend(std::iter::repeat(("System", "noise")).take(50));
        let t = transcript(&entries);

        let window = ContextWindow::build(&t, 2);
        assert_eq!(window.len(), 2);
        assert_eq!(window.dropped, 0);
    }

    #[test]
    fn test_length_is_min_of_limit_and_conversational_count() {
        let t = transcript(&[
            ("You", "1"),
            ("System", "x"),
            ("Assistant", "2"),
            ("You", "3"),
            ("System", "y"),
            ("Assistant", "4"),
        ]);
        for limit in 1..=6 {
            let window = ContextWindow::build(&t, limit);
            let expected = (limit as usize).min(4);
            assert_eq!(window.len(), expected);
            assert_eq!(window.dropped, 4 - expected);
            let texts: Vec<&str> = window.messages.iter().map(|m| m.text()).collect();
            let all = ["1", "2", "3", "4"];
            assert_eq!(texts, all[4 - expected..].to_vec());
            assert!(window.messages.iter().all(|m| m.role() != Role::System));
        }
    }

    #[test]
    fn test_empty_and_system_only_transcripts() {
        assert!(build_context(&[], 5).is_empty());
        let t = transcript(&[("System", "a"), ("Narrator", "b")]);
        assert!(build_context(&t, 0).is_empty());
        assert!(build_context(&t, 3).is_empty());
    }

    #[test]
    fn test_build_is_idempotent_and_leaves_input_alone() {
        let t = transcript(&[("You", "a"), ("Assistant", "b"), ("You", "c")]);
        let before = t.clone();
        let first = build_context(&t, 2);
        let second = build_context(&t, 2);
        assert_eq!(first, second);
        assert_eq!(t, before);
    }
}
