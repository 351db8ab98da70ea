//! Logging for ChatPane.
//!
//! Sets up the `tracing` subscriber (console + rolling NDJSON file), redacts
//! secrets from chat text and emits structured chat events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{ChatEventLogger, ChatLogEvent, EventLogEntry};
pub use logger::{init_logger, LogOptions};
pub use redact::redact_sensitive_data;
