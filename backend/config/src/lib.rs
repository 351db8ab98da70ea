//! `chatpane-config` — configuration for the chat widget and demo host.
//!
//! Provides:
//! - Typed config schema (widget, demo, logging)
//! - YAML read/write with atomic backup rotation
//! - `CHATPANE_*` environment overrides
//! - Default value application
//! - Validation report

pub mod defaults;
pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{apply_env_overrides, apply_env_overrides_with, InvalidEnvVarError};
pub use io::{config_dir, config_file_path, load_config, write_config};
pub use schema::{ChatPaneConfig, DemoConfig, LoggingConfig, WidgetConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::path::Path;

/// A config that passed validation, plus the warnings it raised.
///
/// Warnings are handed back instead of logged so the caller can report them
/// once its subscriber is installed.
#[derive(Debug)]
pub struct PreparedConfig {
    pub config: ChatPaneConfig,
    pub warnings: Vec<ConfigValidationError>,
}

/// Load, apply env overrides and defaults, then validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<PreparedConfig> {
    let config = load_config(path).await?;
    let config = apply_env_overrides(config)?;
    let config = apply_all_defaults(config);

    let warnings = into_warnings(validate(&config), path)?;
    Ok(PreparedConfig { config, warnings })
}

/// Fail with every error's field and message, or return the warnings.
pub fn into_warnings(report: ValidationReport, path: &Path) -> Result<Vec<ConfigValidationError>> {
    if report.is_valid() {
        return Ok(report.warnings);
    }
    let details: Vec<String> = report
        .errors
        .iter()
        .map(|e| format!("  {}: {}", e.path, e.message))
        .collect();
    bail!(
        "{} config error(s) in {}:\n{}",
        report.errors.len(),
        path.display(),
        details.join("\n")
    );
}
