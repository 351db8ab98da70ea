//! Config defaults: fills unset fields of a parsed config.

use crate::schema::{ChatPaneConfig, DemoConfig, LoggingConfig, WidgetConfig};

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome! I'm your AI assistant. How can I help you today?";

pub const DEFAULT_INPUT_PLACEHOLDER: &str =
    "Type your query here and press Enter to send...";

/// Recent user/assistant messages kept in context.
pub const DEFAULT_MAX_CONTEXT_MESSAGES: u32 = 20;

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;

pub const DEFAULT_SIMULATE_DELAY_MS: u64 = 2000;

pub const DEFAULT_CONTEXT_PREVIEW: u32 = 5;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: ChatPaneConfig) -> ChatPaneConfig {
    let config = apply_widget_defaults(config);
    let config = apply_demo_defaults(config);
    apply_logging_defaults(config)
}

fn apply_widget_defaults(mut config: ChatPaneConfig) -> ChatPaneConfig {
    let widget = config.widget.get_or_insert_with(WidgetConfig::default);
    if widget.welcome_message.is_none() {
        widget.welcome_message = Some(DEFAULT_WELCOME_MESSAGE.to_string());
    }
    if widget.max_context_messages.is_none() {
        widget.max_context_messages = Some(DEFAULT_MAX_CONTEXT_MESSAGES);
    }
    if widget.input_placeholder.is_none() {
        widget.input_placeholder = Some(DEFAULT_INPUT_PLACEHOLDER.to_string());
    }
    config
}

fn apply_demo_defaults(mut config: ChatPaneConfig) -> ChatPaneConfig {
    let demo = config.demo.get_or_insert_with(DemoConfig::default);
    if demo.reply_delay_ms.is_none() {
        demo.reply_delay_ms = Some(DEFAULT_REPLY_DELAY_MS);
    }
    if demo.simulate_delay_ms.is_none() {
        demo.simulate_delay_ms = Some(DEFAULT_SIMULATE_DELAY_MS);
    }
    if demo.context_preview.is_none() {
        demo.context_preview = Some(DEFAULT_CONTEXT_PREVIEW);
    }
    config
}

fn apply_logging_defaults(mut config: ChatPaneConfig) -> ChatPaneConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.json.is_none() {
        logging.json = Some(false);
    }
    config
}
