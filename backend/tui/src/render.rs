//! TUI Rendering
//!
//! Translates `ChatWidget` into Ratatui widgets and draws them to the frame.

use chatpane_core::ChatMessage;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::ChatWidget;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const YOU_COLOR: Color = Color::Rgb(0, 120, 212);
const ASSISTANT_COLOR: Color = Color::Rgb(16, 124, 16);
const SYSTEM_COLOR: Color = Color::Rgb(96, 94, 92);

/// Header and body styles for a display sender.
fn sender_styles(sender: &str) -> (Style, Style) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match sender {
        "You" => (bold.fg(YOU_COLOR), Style::default()),
        "Assistant" | "Bot" => (bold.fg(ASSISTANT_COLOR), Style::default()),
        "System" => (
            bold.fg(SYSTEM_COLOR),
            Style::default().fg(SYSTEM_COLOR).add_modifier(Modifier::ITALIC),
        ),
        _ => (bold, Style::default()),
    }
}

/// `[HH:MM:SS] sender:` followed by the message body, with a blank line
/// between messages.
pub fn history_lines(messages: &[ChatMessage]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, msg) in messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        let (header_style, body_style) = sender_styles(msg.sender());
        lines.push(Line::from(Span::styled(
            format!("[{}] {}:", msg.timestamp().time_of_day(), msg.sender()),
            header_style,
        )));
        for body in msg.text().split('\n') {
            lines.push(Line::from(Span::styled(body.to_string(), body_style)));
        }
    }
    lines
}

/// Rows the lines occupy once wrapped to `width` columns.
fn wrapped_rows(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines.iter().map(|l| l.width().div_ceil(width).max(1)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Main draw function. `tick` drives the progress spinner.
pub fn draw_ui(f: &mut Frame, widget: &mut ChatWidget, tick: usize) {
    let progress_height = if widget.is_progress_visible() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),               // Header
            Constraint::Min(3),                  // Chat history
            Constraint::Length(progress_height), // Progress indicator
            Constraint::Length(3),               // Input + send button
            Constraint::Length(1),               // Status line
        ])
        .split(f.size());

    draw_header(f, widget, chunks[0]);
    draw_history(f, widget, chunks[1]);
    if widget.is_progress_visible() {
        let frame = SPINNER[tick % SPINNER.len()];
        let progress = Paragraph::new(format!("{frame} Waiting for response..."))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(progress, chunks[2]);
    }
    draw_input(f, widget, chunks[3]);

    let status = Paragraph::new(widget.status().to_string()).style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, chunks[4]);

    if let Some(panel) = widget.details() {
        let screen = f.size();
        draw_details(f, &panel.title, &panel.lines, screen);
    }

    if let Some(question) = widget.pending_confirm() {
        let screen = f.size();
        draw_confirm(f, question.prompt(), screen);
    }
}

fn draw_header(f: &mut Frame, widget: &ChatWidget, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(28)])
        .split(area);

    let title = Paragraph::new(widget.title().to_string()).style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(title, cols[0]);

    let buttons = Paragraph::new("[^N New]  [^E Export]").alignment(Alignment::Right);
    f.render_widget(buttons, cols[1]);
}

fn draw_history(f: &mut Frame, widget: &mut ChatWidget, area: Rect) {
    let lines = history_lines(widget.messages());
    let inner_height = area.height.saturating_sub(2);
    let total = wrapped_rows(&lines, area.width.saturating_sub(2));
    let max_back = total.saturating_sub(inner_height);
    widget.clamp_scroll(max_back);
    let offset = max_back - widget.scroll_back();

    let history = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Chat History").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(history, area);
}

fn draw_input(f: &mut Frame, widget: &ChatWidget, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(12)])
        .split(area);

    let enabled = widget.is_input_enabled();
    let input = if widget.input_text().is_empty() {
        Paragraph::new(widget.input_placeholder().to_string()).style(Style::default().fg(Color::DarkGray))
    } else {
        let style = if enabled { Style::default() } else { Style::default().fg(Color::DarkGray) };
        Paragraph::new(widget.input_text().to_string()).style(style)
    };
    f.render_widget(input.block(Block::default().borders(Borders::ALL)), cols[0]);

    let button_style = if enabled {
        Style::default().fg(Color::White).bg(YOU_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    };
    let button = Paragraph::new(widget.send_button_label())
        .alignment(Alignment::Center)
        .style(button_style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, cols[1]);

    if enabled && widget.pending_confirm().is_none() {
        let typed = u16::try_from(widget.input_text().chars().count()).unwrap_or(u16::MAX);
        let max_x = cols[0].x + cols[0].width.saturating_sub(2);
        f.set_cursor((cols[0].x + 1).saturating_add(typed).min(max_x), cols[0].y + 1);
    }
}

/// Box covering `pct_w`% by `pct_h`% of `screen`, centered.
fn centered(screen: Rect, pct_w: u16, pct_h: u16) -> Rect {
    let scale = |len: u16, pct: u16| {
        let scaled = u32::from(len) * u32::from(pct) / 100;
        u16::try_from(scaled).unwrap_or(len).max(1).min(len)
    };
    let width = scale(screen.width, pct_w);
    let height = scale(screen.height, pct_h);
    Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    }
}

fn draw_details(f: &mut Frame, title: &str, lines: &[String], screen: Rect) {
    let area = centered(screen, 80, 70);
    let mut body: Vec<Line> = lines.iter().map(|l| Line::from(l.clone())).collect();
    body.push(Line::default());
    body.push(Line::from(Span::styled(
        "[Esc] Close",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    // Keep the tail visible when the dump is taller than the popup.
    let total = wrapped_rows(&body, area.width.saturating_sub(2));
    let offset = total.saturating_sub(area.height.saturating_sub(2));

    let popup = Paragraph::new(Text::from(body))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn draw_confirm(f: &mut Frame, prompt: &str, screen: Rect) {
    let width = screen.width.min(60);
    let height = 6.min(screen.height);
    let area = Rect {
        x: screen.x + (screen.width - width) / 2,
        y: screen.y + (screen.height - height) / 2,
        width,
        height,
    };
    let body = Text::from(vec![
        Line::from(prompt.to_string()),
        Line::default(),
        Line::from(Span::styled("[y] Yes   [n] No", Style::default().add_modifier(Modifier::BOLD))),
    ]);
    let popup = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("New Conversation").borders(Borders::ALL));
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatpane_core::Timestamp;

    #[test]
    fn test_history_lines_layout() {
        let ts: Timestamp = "2025-10-25 14:03:07".parse().unwrap();
        let msgs = vec![
            ChatMessage::new(ts, "You", "Hello"),
            ChatMessage::new(ts, "Assistant", "Line one\nLine two"),
        ];
        let lines = history_lines(&msgs);
        let plain: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(
            plain,
            vec![
                "[14:03:07] You:",
                "Hello",
                "",
                "[14:03:07] Assistant:",
                "Line one",
                "Line two",
            ]
        );
    }

    #[test]
    fn test_sender_styles() {
        assert_eq!(sender_styles("You").0.fg, Some(YOU_COLOR));
        assert_eq!(sender_styles("Bot").0.fg, Some(ASSISTANT_COLOR));
        let (_, system_body) = sender_styles("System");
        assert!(system_body.add_modifier.contains(Modifier::ITALIC));
        assert_eq!(sender_styles("Narrator").0.fg, None);
    }

    #[test]
    fn test_centered_popup_fits_screen() {
        let screen = Rect::new(0, 0, 100, 40);
        let area = centered(screen, 80, 70);
        assert_eq!(area, Rect::new(10, 6, 80, 28));

        let tiny = centered(Rect::new(0, 0, 1, 1), 80, 70);
        assert_eq!((tiny.width, tiny.height), (1, 1));
    }

    #[test]
    fn test_wrapped_rows() {
        let lines = vec![Line::from("x".repeat(25)), Line::default()];
        assert_eq!(wrapped_rows(&lines, 10), 4);
    }
}
