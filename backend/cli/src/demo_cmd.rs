//! Demo host window
//!
//! Wraps the chat widget in a full-screen terminal app with demo controls
//! and a simulated assistant that answers after a delay.

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use chatpane_config::ChatPaneConfig;
use chatpane_core::{Clock, SessionExporter, SystemClock};
use chatpane_tui::{
    draw_ui, echo_reply, handle_key_event, spawn_reply, ChatWidget, KeyOutcome, SimulatedReply,
    WidgetEvent, WidgetOptions,
};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::history_cmd::{format_context_line, format_history_line};

const DEMO_TITLE: &str = "AI Assistant Demo";
const SIMULATED_TEXT: &str = "This is a simulated async response that took 2 seconds to 'process'.";
const SYSTEM_NOTICE: &str = "This is a system notification message. It appears in italic with gray color.";
const HELP: &str = "F1 simulate  F2 progress  F3 history  F4 context  F5 clear  F6-F8 add msg  F9 save  Esc quit";

pub struct DemoHost {
    pub widget: ChatWidget,
    replies: UnboundedSender<SimulatedReply>,
    reply_delay: Duration,
    simulate_delay: Duration,
    context_preview: u32,
    progress_toggled: bool,
    message_counter: u32,
    save_dir: std::path::PathBuf,
}

impl DemoHost {
    pub fn new(
        config: &ChatPaneConfig,
        events: UnboundedSender<WidgetEvent>,
        replies: UnboundedSender<SimulatedReply>,
    ) -> Self {
        let title = match config.title() {
            t if t.trim().is_empty() => DEMO_TITLE.to_string(),
            t => t,
        };
        let widget_config = config.widget.clone().unwrap_or_default();
        let options = WidgetOptions {
            title,
            welcome_message: Some(config.welcome_message()),
            max_context_messages: config.max_context_messages(),
            input_placeholder: widget_config
                .input_placeholder
                .unwrap_or_else(|| WidgetOptions::default().input_placeholder),
            export_dir: config.export_dir(),
            session: "demo".to_string(),
        };
        let mut widget = ChatWidget::new(options, events);
        widget.set_status(format!("Ready - {HELP}"));

        Self {
            widget,
            replies,
            reply_delay: Duration::from_millis(config.reply_delay_ms()),
            simulate_delay: Duration::from_millis(config.simulate_delay_ms()),
            context_preview: config.context_preview(),
            progress_toggled: false,
            message_counter: 0,
            save_dir: config.export_dir(),
        }
    }

    /// Put the widget into its "waiting for the assistant" state.
    fn begin_wait(&mut self) {
        self.widget.set_input_enabled(false);
        self.widget.show_progress();
    }

    pub fn on_widget_event(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::MessageSent(message) => {
                info!(message = %message, "User message");
                self.widget.set_status(format!("Message sent: \"{message}\""));
                self.begin_wait();
                spawn_reply(self.reply_delay, echo_reply(&message), self.replies.clone());
            }
            WidgetEvent::NewConversationRequested => {
                self.message_counter = 0;
                info!("New conversation started");
            }
            WidgetEvent::ExportRequested(path) => {
                info!(path = %path.display(), "Chat exported");
            }
        }
    }

    pub fn on_reply(&mut self, reply: SimulatedReply) {
        self.widget.append_chat_message(&reply.sender, &reply.text);
        self.widget.hide_progress();
        self.progress_toggled = false;
        self.widget.set_input_enabled(true);
        self.widget.set_status("Response received - Ready for next message");
    }

    /// Demo controls bound to F1..F8.
    pub fn on_function_key(&mut self, n: u8) {
        match n {
            1 => {
                self.widget.set_status("Simulating async AI response...");
                self.begin_wait();
                spawn_reply(self.simulate_delay, SIMULATED_TEXT.to_string(), self.replies.clone());
            }
            2 => {
                self.progress_toggled = !self.progress_toggled;
                if self.progress_toggled {
                    self.widget.show_progress();
                    self.widget.set_status("Progress indicator shown");
                } else {
                    self.widget.hide_progress();
                    self.widget.set_status("Progress indicator hidden");
                }
            }
            3 => {
                let history = self.widget.chat_history();
                info!(count = history.len(), "=== Chat History ===");
                for msg in &history {
                    info!(
                        timestamp = %msg.timestamp(),
                        sender = %msg.sender(),
                        role = %msg.role(),
                        text = %msg.text(),
                        "history"
                    );
                }
                let lines = history.iter().map(|m| format_history_line(m, false)).collect();
                self.widget
                    .show_details(format!("Chat History ({} messages)", history.len()), lines);
                self.widget.set_status(format!("Chat history has {} messages", history.len()));
            }
            4 => {
                let context = self.widget.context_messages(Some(i64::from(self.context_preview)));
                info!(limit = self.context_preview, "=== Context Messages ===");
                for msg in &context {
                    info!(role = %msg.role(), sender = %msg.sender(), text = %msg.text(), "context");
                }
                let lines = context.iter().map(|m| format_context_line(m, false)).collect();
                self.widget
                    .show_details(format!("Context Messages ({})", context.len()), lines);
                self.widget.set_status(format!(
                    "Built context with {} messages (user/assistant only)",
                    context.len()
                ));
            }
            5 => {
                self.widget.clear_chat_history();
                self.message_counter = 0;
                self.widget.set_status("Chat history cleared");
            }
            6 => {
                self.message_counter += 1;
                let text = format!("This is demo user message #{}", self.message_counter);
                self.widget.append_chat_message("You", &text);
                self.widget.set_status("Added user message");
            }
            7 => {
                self.message_counter += 1;
                let text = format!(
                    "This is demo assistant response #{}. I can help you with various tasks!",
                    self.message_counter
                );
                self.widget.append_chat_message("Assistant", &text);
                self.widget.set_status("Added assistant message");
            }
            8 => {
                self.widget.append_chat_message("System", SYSTEM_NOTICE);
                self.widget.set_status("Added system message");
            }
            _ => {}
        }
    }

    /// Save the ledger as JSON so it can be reloaded with `chatpane history`.
    async fn save_session(&mut self) {
        let name = format!("chat_session_{}", SystemClock.now().file_stamp());
        match SessionExporter::new(&self.save_dir)
            .save_json(self.widget.messages(), &name)
            .await
        {
            Ok(path) => self.widget.set_status(format!("Session saved to: {}", path.display())),
            Err(e) => {
                error!(error = %e, "Failed to save session");
                self.widget.set_status(format!("Save failed: {e}"));
            }
        }
    }

    pub async fn on_key(&mut self, key: KeyEvent) {
        match handle_key_event(key, &mut self.widget) {
            KeyOutcome::Consumed => {}
            KeyOutcome::Export => {
                if let Err(e) = self.widget.export_history().await {
                    error!(error = %e, "Export failed");
                }
            }
            KeyOutcome::Unhandled => match key.code {
                KeyCode::F(9) => self.save_session().await,
                KeyCode::F(n) => self.on_function_key(n),
                _ => {}
            },
        }
    }
}

type Term = Terminal<CrosstermBackend<Stdout>>;

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the demo window until the user quits.
pub async fn run(config: ChatPaneConfig) -> Result<()> {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (replies_tx, mut replies_rx) = mpsc::unbounded_channel();
    let mut host = DemoHost::new(&config, events_tx, replies_tx);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut host, &mut events_rx, &mut replies_rx).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Term,
    host: &mut DemoHost,
    events_rx: &mut UnboundedReceiver<WidgetEvent>,
    replies_rx: &mut UnboundedReceiver<SimulatedReply>,
) -> Result<()> {
    let mut keys = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let mut tick: usize = 0;

    loop {
        terminal.draw(|f| draw_ui(f, &mut host.widget, tick))?;
        if host.widget.should_quit {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => tick = tick.wrapping_add(1),
            Some(event) = events_rx.recv() => host.on_widget_event(event),
            Some(reply) = replies_rx.recv() => host.on_reply(reply),
            next = keys.next() => match next {
                Some(Ok(Event::Key(key))) => host.on_key(key).await,
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatpane_config::apply_all_defaults;
    use chatpane_core::Role;
    use crossterm::event::KeyModifiers;

    fn host() -> (
        DemoHost,
        UnboundedReceiver<WidgetEvent>,
        UnboundedReceiver<SimulatedReply>,
    ) {
        let mut config = apply_all_defaults(ChatPaneConfig::default());
        if let Some(demo) = config.demo.as_mut() {
            demo.reply_delay_ms = Some(5);
            demo.simulate_delay_ms = Some(5);
        }
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        (DemoHost::new(&config, events_tx, replies_tx), events_rx, replies_rx)
    }

    #[tokio::test]
    async fn test_sent_message_gets_simulated_reply() {
        let (mut host, mut events, mut replies) = host();
        for c in "ping".chars() {
            host.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)).await;
        }
        host.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)).await;

        let event = events.recv().await.unwrap();
        host.on_widget_event(event);
        assert!(!host.widget.is_input_enabled());
        assert!(host.widget.is_progress_visible());

        let reply = replies.recv().await.unwrap();
        host.on_reply(reply);
        assert!(host.widget.is_input_enabled());
        assert!(!host.widget.is_progress_visible());

        let last = host.widget.messages().last().unwrap();
        assert_eq!(last.role(), Role::Assistant);
        assert_eq!(last.text(), echo_reply("ping"));
    }

    #[tokio::test]
    async fn test_demo_controls() {
        let (mut host, _events, _replies) = host();
        host.on_function_key(6);
        host.on_function_key(7);
        host.on_function_key(8);
        let msgs = host.widget.messages();
        assert_eq!(msgs.len(), 5);
        assert_eq!(msgs[2].text(), "This is demo user message #1");
        assert!(msgs[3].text().starts_with("This is demo assistant response #2."));
        assert_eq!(msgs[4].role(), Role::System);

        // Greeting + note come from the assistant, so they count as context.
        host.on_function_key(4);
        assert_eq!(host.widget.status(), "Built context with 4 messages (user/assistant only)");
        let panel = host.widget.details().unwrap();
        assert_eq!(panel.lines.len(), 4);
        assert_eq!(panel.lines[2], "[user] You: This is demo user message #1");
        host.widget.close_details();

        host.on_function_key(2);
        assert!(host.widget.is_progress_visible());
        host.on_function_key(2);
        assert!(!host.widget.is_progress_visible());

        host.on_function_key(5);
        assert_eq!(host.widget.messages().len(), 2);
        host.on_function_key(6);
        assert_eq!(host.widget.messages()[2].text(), "This is demo user message #1");
    }

    #[tokio::test]
    async fn test_show_history_opens_panel() {
        let (mut host, _events, _replies) = host();
        host.on_function_key(6);
        host.on_function_key(3);

        assert_eq!(host.widget.status(), "Chat history has 3 messages");
        let panel = host.widget.details().unwrap();
        assert_eq!(panel.title, "Chat History (3 messages)");
        assert_eq!(panel.lines.len(), 3);
        assert!(panel.lines[2].ends_with("You (user): This is demo user message #1"));

        host.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).await;
        assert!(host.widget.details().is_none());
        assert!(!host.widget.should_quit);
    }

    #[tokio::test]
    async fn test_simulate_response_control() {
        let (mut host, _events, mut replies) = host();
        host.on_function_key(1);
        assert_eq!(host.widget.send_button_label(), "Wait...");
        let reply = replies.recv().await.unwrap();
        assert_eq!(reply.text, SIMULATED_TEXT);
    }

    #[tokio::test]
    async fn test_save_session_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let (mut host, _events, _replies) = host();
        host.save_dir = dir.path().to_path_buf();
        host.on_key(KeyEvent::new(KeyCode::F(9), KeyModifiers::NONE)).await;
        assert!(host.widget.status().starts_with("Session saved to: "));

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let saved = entries.next_entry().await.unwrap().unwrap().path();
        let loaded = SessionExporter::load_json(&saved).await.unwrap();
        assert_eq!(loaded, host.widget.chat_history());
    }
}
