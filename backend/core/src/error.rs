use thiserror::Error;

/// Error type for the boundaries of the chat ledger (import, export, parsing).
///
/// Ledger operations themselves (`append`, `clear`, `replace_all`,
/// `build_context`) are total and never produce one of these.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("invalid timestamp '{0}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),

    #[error("unknown role '{0}': expected user, assistant or system")]
    UnknownRole(String),

    #[error("no chat history to export")]
    EmptyHistory,

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChatError>;
