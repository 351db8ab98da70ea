//! ChatPane core: the chat ledger, sender role classification, context
//! windowing and the export/import contract.

pub mod clock;
pub mod context_window;
pub mod error;
pub mod history;
pub mod message;
pub mod session_export;

pub use clock::{Clock, FixedClock, SystemClock};
pub use context_window::{build_context, ContextWindow};
pub use error::ChatError;
pub use history::ChatHistory;
pub use message::{sender_to_role, ChatMessage, Role, SeedMessage, Timestamp};
pub use session_export::{from_json, render_text_export, to_json, SessionExporter};
