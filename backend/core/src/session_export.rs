//! Chat history export (plain text) and JSON save/load.
//!
//! Text export is for people and is not read back. JSON keeps every field,
//! including the stored role, so a restored ledger is identical to the saved one.

use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ChatError, Result};
use crate::message::{ChatMessage, Timestamp};

const RULE: &str = "========================================";

// ---------------------------------------------------------------------------
// Text export
// ---------------------------------------------------------------------------

/// Render the human-readable export of `messages`.
pub fn render_text_export(messages: &[ChatMessage], exported_at: Timestamp) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push('\n');
    out.push_str("Chat History Export\n");
    out.push_str(&format!("Exported: {}\n", exported_at));
    out.push_str(&format!("Total Messages: {}\n", messages.len()));
    out.push_str(RULE);
    out.push_str("\n\n");

    for m in messages {
        out.push_str(&format!("[{}] {}:\n", m.timestamp(), m.sender()));
        out.push_str(m.text());
        out.push_str("\n\n");
    }
    out
}

/// Default export file name, e.g. `chat_export_20251113_142501.txt`.
pub fn default_export_file_name(at: Timestamp) -> String {
    format!("chat_export_{}.txt", at.file_stamp())
}

// ---------------------------------------------------------------------------
// JSON persistence
// ---------------------------------------------------------------------------

/// Serialize the ledger as a JSON array of `{timestamp, sender, text, role}`.
pub fn to_json(messages: &[ChatMessage]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}

/// Parse a saved ledger, validating each record.
///
/// Roles are taken from the records as stored, never re-derived from the sender.
pub fn from_json(raw: &str) -> Result<Vec<ChatMessage>> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<ChatMessage>(record).map_err(|e| ChatError::MalformedRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// File exporter
// ---------------------------------------------------------------------------

pub struct SessionExporter {
    pub output_dir: PathBuf,
}

impl SessionExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    /// Write the text export to `chat_export_<stamp>.txt` in the output dir.
    pub async fn export_text(&self, messages: &[ChatMessage], exported_at: Timestamp) -> Result<PathBuf> {
        let path = self.output_dir.join(default_export_file_name(exported_at));
        self.export_text_to(&path, messages, exported_at).await?;
        Ok(path)
    }

    /// Write the text export to an explicit path.
    pub async fn export_text_to(&self, path: &Path, messages: &[ChatMessage], exported_at: Timestamp) -> Result<()> {
        if messages.is_empty() {
            return Err(ChatError::EmptyHistory);
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, render_text_export(messages, exported_at)).await?;
        info!("[SessionExport] Exported {} messages → {}", messages.len(), path.display());
        Ok(())
    }

    /// Save the ledger as `<name>.json` in the output dir.
    pub async fn save_json(&self, messages: &[ChatMessage], name: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(format!("{}.json", name));
        tokio::fs::write(&path, to_json(messages)?).await?;
        info!("[SessionExport] Saved {} messages → {}", messages.len(), path.display());
        Ok(path)
    }

    /// Load a ledger previously written by [`SessionExporter::save_json`].
    pub async fn load_json(path: &Path) -> Result<Vec<ChatMessage>> {
        let raw = tokio::fs::read_to_string(path).await?;
        let messages = from_json(&raw)?;
        info!("[SessionExport] Loaded {} messages ← {}", messages.len(), path.display());
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::history::ChatHistory;
    use crate::message::Role;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn sample() -> ChatHistory<FixedClock> {
        let mut h = ChatHistory::with_clock(FixedClock::new(ts("2025-11-13 14:00:00")));
        h.append("You", "Hello");
        h.append("Assistant", "Hi there\nsecond line");
        h.append("System", "Note");
        h
    }

    #[test]
    fn test_text_export_layout() {
        let h = sample();
        let text = render_text_export(h.messages(), ts("2025-11-13 15:30:00"));
        let expected = "\
========================================
Chat History Export
Exported: 2025-11-13 15:30:00
Total Messages: 3
========================================

[2025-11-13 14:00:00] You:
Hello

[2025-11-13 14:00:01] Assistant:
Hi there
second line

[2025-11-13 14:00:02] System:
Note

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_default_export_file_name() {
        assert_eq!(
            default_export_file_name(ts("2025-11-13 14:25:01")),
            "chat_export_20251113_142501.txt"
        );
    }

    #[test]
    fn test_json_restore_matches_ledger() {
        let h = sample();
        let raw = to_json(h.messages()).unwrap();

        let mut restored = ChatHistory::new();
        restored.replace_all(from_json(&raw).unwrap());
        assert_eq!(restored.get_all(), h.get_all());
    }

    #[test]
    fn test_json_import_trusts_stored_role() {
        let raw = r#"[{"timestamp":"2025-11-13 14:00:00","sender":"You","text":"x","role":"system"}]"#;
        let messages = from_json(raw).unwrap();
        assert_eq!(messages[0].role(), Role::System);
        assert_eq!(messages[0].sender(), "You");
    }

    #[test]
    fn test_json_import_reports_malformed_record_index() {
        let raw = r#"[
            {"timestamp":"2025-11-13 14:00:00","sender":"You","text":"ok","role":"user"},
            {"timestamp":"13/11/2025","sender":"You","text":"bad","role":"user"}
        ]"#;
        match from_json(raw) {
            Err(ChatError::MalformedRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("13/11/2025"));
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_json_import_rejects_unknown_role_and_missing_fields() {
        let unknown_role = r#"[{"timestamp":"2025-11-13 14:00:00","sender":"You","text":"x","role":"tool"}]"#;
        assert!(matches!(from_json(unknown_role), Err(ChatError::MalformedRecord { index: 0, .. })));

        let missing_text = r#"[{"timestamp":"2025-11-13 14:00:00","sender":"You","role":"user"}]"#;
        assert!(matches!(from_json(missing_text), Err(ChatError::MalformedRecord { index: 0, .. })));

        assert!(matches!(from_json("not json"), Err(ChatError::Serialization(_))));
        assert!(from_json("[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exporter_writes_and_loads_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let h = sample();

        let txt = exporter.export_text(h.messages(), ts("2025-11-13 15:30:00")).await.unwrap();
        assert_eq!(txt.file_name().unwrap(), "chat_export_20251113_153000.txt");
        let written = tokio::fs::read_to_string(&txt).await.unwrap();
        assert!(written.contains("Total Messages: 3"));

        let json = exporter.save_json(h.messages(), "session").await.unwrap();
        let loaded = SessionExporter::load_json(&json).await.unwrap();
        assert_eq!(loaded, h.get_all());
    }

    #[tokio::test]
    async fn test_exporter_refuses_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = SessionExporter::new(dir.path());
        let result = exporter.export_text(&[], ts("2025-11-13 15:30:00")).await;
        assert!(matches!(result, Err(ChatError::EmptyHistory)));
    }
}
