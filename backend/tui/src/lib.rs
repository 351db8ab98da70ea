//! Terminal chat widget for ChatPane.
//!
//! Exposes the widget state, key handling, ratatui rendering and a simulated
//! asynchronous responder used by the demo host.

pub mod app;
pub mod input;
pub mod render;
pub mod responder;

pub use app::{ChatWidget, Confirm, DetailsPanel, WidgetEvent, WidgetOptions};
pub use input::{handle_key_event, KeyOutcome};
pub use render::draw_ui;
pub use responder::{echo_reply, spawn_reply, SimulatedReply};
