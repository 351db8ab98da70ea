//! Keyboard Input Handler
//!
//! Processes crossterm key events and updates the `ChatWidget`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::ChatWidget;

/// What the host still has to do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The widget handled the key.
    Consumed,
    /// Not a widget key; the host may bind it.
    Unhandled,
    /// The user asked for an export, which needs the async runtime.
    Export,
}

const SCROLL_STEP: u16 = 5;

/// Handles a single keyboard event.
pub fn handle_key_event(key: KeyEvent, widget: &mut ChatWidget) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Consumed;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        widget.should_quit = true;
        return KeyOutcome::Consumed;
    }

    // An open details panel swallows keys until dismissed.
    if widget.details().is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            widget.close_details();
        }
        return KeyOutcome::Consumed;
    }

    // An open confirmation is modal.
    if widget.pending_confirm().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => widget.confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => widget.confirm(false),
            _ => {}
        }
        return KeyOutcome::Consumed;
    }

    match key.code {
        KeyCode::Esc => widget.should_quit = true,
        KeyCode::Char('n') if ctrl => widget.request_new_conversation(),
        KeyCode::Char('e') if ctrl => return KeyOutcome::Export,
        KeyCode::PageUp => widget.scroll_up(SCROLL_STEP),
        KeyCode::PageDown => widget.scroll_down(SCROLL_STEP),
        KeyCode::Enter => {
            widget.submit();
        }
        KeyCode::Backspace => widget.pop_input(),
        KeyCode::Char(c) if !ctrl => widget.push_input(c),
        _ => return KeyOutcome::Unhandled,
    }
    KeyOutcome::Consumed
}
