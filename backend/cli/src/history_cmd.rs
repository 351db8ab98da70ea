//! Offline history commands
//!
//! Inspect a saved JSON chat session: list it, show the context window a
//! model would receive, or write the plain-text export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chatpane_core::{build_context, ChatMessage, Clock, SessionExporter, SystemClock};

use crate::terminal_output::{paint, role_style, supports_color};

async fn load(file: &Path) -> Result<Vec<ChatMessage>> {
    SessionExporter::load_json(file)
        .await
        .with_context(|| format!("Failed to load chat session: {}", file.display()))
}

/// `[timestamp] sender (role): text`
pub fn format_history_line(msg: &ChatMessage, color: bool) -> String {
    let header = format!("[{}] {} ({}):", msg.timestamp(), msg.sender(), msg.role());
    format!("{} {}", paint(&header, &role_style(msg.role()), color), msg.text())
}

/// `[role] sender: text`
pub fn format_context_line(msg: &ChatMessage, color: bool) -> String {
    let header = format!("[{}] {}:", msg.role(), msg.sender());
    format!("{} {}", paint(&header, &role_style(msg.role()), color), msg.text())
}

pub async fn show_history(file: &Path) -> Result<()> {
    let messages = load(file).await?;
    let color = supports_color();
    println!("=== Chat History ({} messages) ===", messages.len());
    for msg in &messages {
        println!("{}", format_history_line(msg, color));
    }
    Ok(())
}

pub async fn show_context(file: &Path, limit: i64) -> Result<()> {
    let messages = load(file).await?;
    let context = build_context(&messages, limit);
    let color = supports_color();
    if limit > 0 {
        println!("=== Context Messages (last {} user/assistant) ===", limit);
    } else {
        println!("=== Context Messages (all user/assistant) ===");
    }
    for msg in &context {
        println!("{}", format_context_line(msg, color));
    }
    println!("Built context with {} messages", context.len());
    Ok(())
}

pub async fn export(file: &Path, out_dir: PathBuf) -> Result<()> {
    let messages = load(file).await?;
    let path = SessionExporter::new(out_dir)
        .export_text(&messages, SystemClock.now())
        .await
        .context("Failed to export chat history")?;
    println!("Chat history exported successfully to: {}", path.display());
    Ok(())
}
