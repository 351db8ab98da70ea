//! Environment variable overrides for config values.
//!
//! Recognised variables:
//! - `CHATPANE_TITLE`
//! - `CHATPANE_MAX_CONTEXT`
//! - `CHATPANE_REPLY_DELAY_MS`
//! - `CHATPANE_EXPORT_DIR`
//! - `CHATPANE_LOG_LEVEL`

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::schema::{ChatPaneConfig, DemoConfig, LoggingConfig, WidgetConfig};

/// Returned when a numeric override does not parse.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value \"{value}\" for env var {var_name}")]
pub struct InvalidEnvVarError {
    pub var_name: String,
    pub value: String,
}

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: ChatPaneConfig) -> Result<ChatPaneConfig, InvalidEnvVarError> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: ChatPaneConfig,
    env: &HashMap<String, String>,
) -> Result<ChatPaneConfig, InvalidEnvVarError> {
    if let Some(title) = env.get("CHATPANE_TITLE") {
        config.widget.get_or_insert_with(WidgetConfig::default).title = Some(title.clone());
    }
    if let Some(max) = parse_var::<u32>(env, "CHATPANE_MAX_CONTEXT")? {
        config.widget.get_or_insert_with(WidgetConfig::default).max_context_messages = Some(max);
    }
    if let Some(delay) = parse_var::<u64>(env, "CHATPANE_REPLY_DELAY_MS")? {
        config.demo.get_or_insert_with(DemoConfig::default).reply_delay_ms = Some(delay);
    }
    if let Some(dir) = env.get("CHATPANE_EXPORT_DIR") {
        config.demo.get_or_insert_with(DemoConfig::default).export_dir = Some(PathBuf::from(dir));
    }
    if let Some(level) = env.get("CHATPANE_LOG_LEVEL") {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.clone());
    }
    Ok(config)
}

fn parse_var<T: FromStr>(
    env: &HashMap<String, String>,
    name: &str,
) -> Result<Option<T>, InvalidEnvVarError> {
    match env.get(name) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| InvalidEnvVarError {
            var_name: name.to_string(),
            value: raw.clone(),
        }),
    }
}
