//! Chat Widget State
//!
//! Owns the chat ledger plus everything the terminal widget shows around it:
//! title, input buffer, progress indicator, send-button state, confirmation
//! prompt and status line.

use std::path::PathBuf;

use chatpane_core::error::Result;
use chatpane_core::{ChatHistory, ChatMessage, Clock, ContextWindow, SeedMessage, SessionExporter, SystemClock};
use chatpane_logging::{ChatEventLogger, ChatLogEvent};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

pub const DEFAULT_WELCOME: &str = "Welcome! I'm your AI assistant. How can I help you today?";

/// Notifications from the widget to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The user submitted a non-blank message (already appended as "You").
    MessageSent(String),
    /// History was cleared after the user confirmed "New".
    NewConversationRequested,
    /// The history was written to this file.
    ExportRequested(PathBuf),
}

/// Read-only text shown over the history until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsPanel {
    pub title: String,
    pub lines: Vec<String>,
}

/// A yes/no question awaiting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    NewConversation,
}

impl Confirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::NewConversation => {
                "Are you sure you want to start a new conversation? Current chat history will be cleared."
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub title: String,
    /// Falls back to [`DEFAULT_WELCOME`] when `None` or blank.
    pub welcome_message: Option<String>,
    /// Context size used when no explicit limit is requested. 0 = all.
    pub max_context_messages: u32,
    pub input_placeholder: String,
    pub export_dir: PathBuf,
    /// Label attached to structured chat-event logs.
    pub session: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            welcome_message: None,
            max_context_messages: 20,
            input_placeholder: "Type your query here and press Enter to send...".to_string(),
            export_dir: PathBuf::from("."),
            session: "chat".to_string(),
        }
    }
}

pub struct ChatWidget {
    history: ChatHistory,
    title: String,
    welcome_message: String,
    max_context_messages: u32,
    input: String,
    input_placeholder: String,
    input_enabled: bool,
    progress_visible: bool,
    pending_confirm: Option<Confirm>,
    details: Option<DetailsPanel>,
    status: String,
    /// Rows scrolled up from the newest message.
    scroll_back: u16,
    export_dir: PathBuf,
    session: String,
    events: UnboundedSender<WidgetEvent>,
    pub should_quit: bool,
}

impl ChatWidget {
    pub fn new(options: WidgetOptions, events: UnboundedSender<WidgetEvent>) -> Self {
        let welcome_message = options
            .welcome_message
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WELCOME.to_string());

        let mut widget = Self {
            history: ChatHistory::new(),
            title: options.title,
            welcome_message,
            max_context_messages: options.max_context_messages,
            input: String::new(),
            input_placeholder: options.input_placeholder,
            input_enabled: true,
            progress_visible: false,
            pending_confirm: None,
            details: None,
            status: String::new(),
            scroll_back: 0,
            export_dir: options.export_dir,
            session: options.session,
            events,
            should_quit: false,
        };
        // The first greeting comes from the assistant, so it is part of the
        // context; later resets are plain system notices.
        let seed = widget.seed_messages("Assistant");
        widget.history.clear(&seed);
        widget
    }

    /// Welcome and context-size note shown at the start of a conversation.
    fn seed_messages(&self, sender: &str) -> Vec<SeedMessage> {
        let note = if self.max_context_messages == 0 {
            "Note: The assistant will remember the entire conversation for context.".to_string()
        } else {
            format!(
                "Note: The assistant will remember up to {} recent messages for context.",
                self.max_context_messages
            )
        };
        vec![
            SeedMessage::new(sender, self.welcome_message.clone()),
            SeedMessage::new(sender, note),
        ]
    }

    fn emit(&self, event: WidgetEvent) {
        if self.events.send(event).is_err() {
            warn!("Widget event dropped: host receiver closed");
        }
    }

    // -- History --------------------------------------------------------------

    pub fn append_chat_message(&mut self, sender: &str, text: &str) -> ChatMessage {
        let msg = self.history.append(sender, text).clone();
        ChatEventLogger::log_event(&self.session, ChatLogEvent::appended(&msg));
        self.scroll_back = 0;
        msg
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.history.messages()
    }

    pub fn chat_history(&self) -> Vec<ChatMessage> {
        self.history.get_all()
    }

    /// Replace the whole history, e.g. when restoring a saved session.
    pub fn set_chat_history(&mut self, messages: Vec<ChatMessage>) {
        let count = messages.len();
        self.history.replace_all(messages);
        ChatEventLogger::log_event(&self.session, ChatLogEvent::HistoryReplaced { count });
        self.scroll_back = 0;
    }

    /// Start over with the welcome and context notes.
    pub fn clear_chat_history(&mut self) {
        let seed = self.seed_messages("System");
        self.history.clear(&seed);
        ChatEventLogger::log_event(&self.session, ChatLogEvent::HistoryCleared { seeded: seed.len() });
        self.scroll_back = 0;
    }

    /// Context for the next assistant turn.
    ///
    /// `Some(n)` with `n > 0` windows to `n` messages; anything else uses the
    /// configured `max_context_messages`.
    pub fn context_messages(&self, max: Option<i64>) -> Vec<ChatMessage> {
        let limit = match max {
            Some(n) if n > 0 => n,
            _ => i64::from(self.max_context_messages),
        };
        let window = ContextWindow::build(self.history.messages(), limit);
        ChatEventLogger::log_event(
            &self.session,
            ChatLogEvent::ContextBuilt {
                limit,
                count: window.len(),
                dropped: window.dropped,
            },
        );
        window.into_messages()
    }

    pub fn max_context_messages(&self) -> u32 {
        self.max_context_messages
    }

    // -- Input ----------------------------------------------------------------

    /// Send the current input as a user message.
    ///
    /// Blank input (after trimming) is ignored, as is anything typed while the
    /// input is disabled.
    pub fn submit(&mut self) -> Option<String> {
        if !self.input_enabled {
            return None;
        }
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }
        self.append_chat_message("You", &text);
        self.input.clear();
        self.emit(WidgetEvent::MessageSent(text.clone()));
        Some(text)
    }

    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn input_placeholder(&self) -> &str {
        &self.input_placeholder
    }

    pub fn push_input(&mut self, c: char) {
        if self.input_enabled {
            self.input.push(c);
        }
    }

    pub fn pop_input(&mut self) {
        if self.input_enabled {
            self.input.pop();
        }
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn send_button_label(&self) -> &'static str {
        if self.input_enabled { "Send" } else { "Wait..." }
    }

    // -- Progress, title, status ----------------------------------------------

    pub fn show_progress(&mut self) {
        self.progress_visible = true;
    }

    pub fn hide_progress(&mut self) {
        self.progress_visible = false;
    }

    pub fn is_progress_visible(&self) -> bool {
        self.progress_visible
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    // -- Scrolling ------------------------------------------------------------

    pub fn scroll_back(&self) -> u16 {
        self.scroll_back
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll_back = self.scroll_back.saturating_add(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(rows);
    }

    /// Clamp scroll-back to what the rendered history can actually show.
    pub fn clamp_scroll(&mut self, max: u16) {
        self.scroll_back = self.scroll_back.min(max);
    }

    // -- New / Export controls ------------------------------------------------

    pub fn pending_confirm(&self) -> Option<Confirm> {
        self.pending_confirm
    }

    pub fn request_new_conversation(&mut self) {
        self.pending_confirm = Some(Confirm::NewConversation);
    }

    /// Answer the open confirmation, if any.
    pub fn confirm(&mut self, yes: bool) {
        let Some(question) = self.pending_confirm.take() else { return };
        match (question, yes) {
            (Confirm::NewConversation, true) => {
                self.clear_chat_history();
                self.status = "Started a new conversation".to_string();
                self.emit(WidgetEvent::NewConversationRequested);
            }
            (Confirm::NewConversation, false) => {}
        }
    }

    pub fn details(&self) -> Option<&DetailsPanel> {
        self.details.as_ref()
    }

    pub fn show_details(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.details = Some(DetailsPanel {
            title: title.into(),
            lines,
        });
    }

    pub fn close_details(&mut self) {
        self.details = None;
    }

    /// Write the history to `chat_export_<stamp>.txt` in the export dir.
    ///
    /// Returns `Ok(None)` when there is nothing to export.
    pub async fn export_history(&mut self) -> Result<Option<PathBuf>> {
        if self.history.is_empty() {
            self.status = "No chat history to export.".to_string();
            return Ok(None);
        }

        let exporter = SessionExporter::new(&self.export_dir);
        match exporter.export_text(self.history.messages(), SystemClock.now()).await {
            Ok(path) => {
                ChatEventLogger::log_event(
                    &self.session,
                    ChatLogEvent::Exported {
                        path: path.display().to_string(),
                        count: self.history.len(),
                    },
                );
                self.status = format!("Chat history exported successfully to: {}", path.display());
                self.emit(WidgetEvent::ExportRequested(path.clone()));
                Ok(Some(path))
            }
            Err(e) => {
                self.status = format!("Export failed: {e}");
                Err(e)
            }
        }
    }
}
