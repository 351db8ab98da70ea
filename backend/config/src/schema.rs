//! ChatPane configuration schema, typed for serde YAML deserialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::defaults::{
    DEFAULT_CONTEXT_PREVIEW, DEFAULT_LOG_LEVEL, DEFAULT_MAX_CONTEXT_MESSAGES,
    DEFAULT_REPLY_DELAY_MS, DEFAULT_SIMULATE_DELAY_MS, DEFAULT_WELCOME_MESSAGE,
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPaneConfig {
    /// Chat widget appearance and context policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetConfig>,

    /// Demo host timings and output locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<DemoConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    /// How many recent user/assistant messages are sent as context. 0 = all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_context_messages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    /// Delay before the simulated reply to a typed message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_delay_ms: Option<u64>,
    /// Delay used by the "simulate response" control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulate_delay_ms: Option<u64>,
    /// Window size used by the "show context" control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_preview: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for rolling log files. No file logging when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
}

impl ChatPaneConfig {
    pub fn title(&self) -> String {
        self.widget
            .as_ref()
            .and_then(|w| w.title.clone())
            .unwrap_or_default()
    }

    pub fn welcome_message(&self) -> String {
        self.widget
            .as_ref()
            .and_then(|w| w.welcome_message.clone())
            .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string())
    }

    pub fn max_context_messages(&self) -> u32 {
        self.widget
            .as_ref()
            .and_then(|w| w.max_context_messages)
            .unwrap_or(DEFAULT_MAX_CONTEXT_MESSAGES)
    }

    pub fn reply_delay_ms(&self) -> u64 {
        self.demo
            .as_ref()
            .and_then(|d| d.reply_delay_ms)
            .unwrap_or(DEFAULT_REPLY_DELAY_MS)
    }

    pub fn simulate_delay_ms(&self) -> u64 {
        self.demo
            .as_ref()
            .and_then(|d| d.simulate_delay_ms)
            .unwrap_or(DEFAULT_SIMULATE_DELAY_MS)
    }

    pub fn context_preview(&self) -> u32 {
        self.demo
            .as_ref()
            .and_then(|d| d.context_preview)
            .unwrap_or(DEFAULT_CONTEXT_PREVIEW)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.demo
            .as_ref()
            .and_then(|d| d.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_camel_case_yaml() {
        let yaml = r#"
widget:
  title: Support Bot
  maxContextMessages: 8
demo:
  replyDelayMs: 250
logging:
  level: debug
"#;
        let config: ChatPaneConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title(), "Support Bot");
        assert_eq!(config.max_context_messages(), 8);
        assert_eq!(config.reply_delay_ms(), 250);
        assert_eq!(config.simulate_delay_ms(), DEFAULT_SIMULATE_DELAY_MS);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_empty_config_falls_back_to_defaults() {
        let config = ChatPaneConfig::default();
        assert_eq!(config.max_context_messages(), 20);
        assert_eq!(config.context_preview(), 5);
        assert_eq!(config.welcome_message(), DEFAULT_WELCOME_MESSAGE);
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }
}
