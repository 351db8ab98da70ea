//! Terminal output utilities: ANSI styling for chat lines printed to stdout.

use chatpane_core::Role;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const ITALIC: &str = "\x1b[3m";

pub const GREEN: &str = "\x1b[32m";
pub const BLUE: &str = "\x1b[34m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Wrap `text` in the given ANSI codes when `color` is on.
pub fn paint(text: &str, codes: &str, color: bool) -> String {
    if color {
        format!("{codes}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// ANSI codes for a role's header.
pub fn role_style(role: Role) -> String {
    match role {
        Role::User => format!("{BOLD}{BLUE}"),
        Role::Assistant => format!("{BOLD}{GREEN}"),
        Role::System => format!("{DIM}{ITALIC}"),
    }
}
