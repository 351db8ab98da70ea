//! Config validation with field paths and user-friendly messages.

use crate::schema::ChatPaneConfig;
use thiserror::Error;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// All errors and warnings found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

pub fn validate(config: &ChatPaneConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_widget(config, &mut report);
    validate_demo(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_widget(config: &ChatPaneConfig, report: &mut ValidationReport) {
    let Some(widget) = &config.widget else { return };
    if widget.max_context_messages == Some(0) {
        report.warn(
            "widget.maxContextMessages",
            "0 sends the entire conversation as context",
        );
    }
    if let Some(welcome) = &widget.welcome_message {
        if welcome.trim().is_empty() {
            report.warn("widget.welcomeMessage", "Welcome message is blank");
        }
    }
}

fn validate_demo(config: &ChatPaneConfig, report: &mut ValidationReport) {
    let Some(demo) = &config.demo else { return };
    if let Some(preview) = demo.context_preview {
        let max = config.max_context_messages();
        if preview == 0 {
            let fallback = if max == 0 {
                "the entire conversation".to_string()
            } else {
                format!("maxContextMessages ({max})")
            };
            report.warn(
                "demo.contextPreview",
                format!("0 does not preview everything; it falls back to {fallback}"),
            );
        }
        if max > 0 && preview > max {
            report.warn(
                "demo.contextPreview",
                format!("Preview of {preview} exceeds maxContextMessages ({max})"),
            );
        }
    }
}

fn validate_logging(config: &ChatPaneConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        let level = level.trim();
        if level.is_empty() {
            report.error("logging.level", "Log level cannot be empty");
        } else if !level.contains('=') && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            report.error(
                "logging.level",
                format!("Unknown log level \"{level}\"; expected one of {}", LOG_LEVELS.join(", ")),
            );
        }
    }
}
