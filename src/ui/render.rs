use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
    Frame,
};

use crate::app::{App, BackendStatus, ControlLayout};
use crate::config::{ColorConfig, Config};

use super::bubble::conversation_lines;
use super::gradient::{gradient_block_with_status, gradient_color};
use super::text::display_width;

/// Title of the chat panel.
pub const TITLE: &str = " Appointment Agent ";

/// Hint shown in the empty input box.
pub const PLACEHOLDER: &str = "Type a message (e.g. \"I need to book\")";

/// Label of the Send control.
pub const SEND_LABEL: &str = "[ Send ]";

/// Label of the Send control while a request is in flight.
pub const SENDING_LABEL: &str = "[ Sending... ]";

/// Label of the Reset control.
pub const RESET_LABEL: &str = "[ Reset ]";

/// Key hints shown in the footer when the terminal reports Shift+Enter.
pub const HELP_TEXT: &str = "Enter send · Shift+Enter newline · Ctrl+R reset · ↑/↓ scroll · Esc quit";

/// Key hints for terminals that send the same byte for Enter and Shift+Enter.
pub const HELP_TEXT_LEGACY: &str = "Enter send · Alt+Enter newline · Ctrl+R reset · ↑/↓ scroll · Esc quit";

/// Footer hints matching what the terminal can report.
pub fn help_text(keyboard_enhanced: bool) -> &'static str {
    if keyboard_enhanced {
        HELP_TEXT
    } else {
        HELP_TEXT_LEGACY
    }
}

/// Rows of text visible in the input box.
const INPUT_ROWS: u16 = 3;

/// Width of the column holding the Send and Reset controls.
const CONTROLS_WIDTH: u16 = 16;

/// Main UI rendering function.
pub fn ui(f: &mut Frame, app: &mut App, config: &Config) {
    let colors = &config.colors;
    let (chat_start, chat_end) = colors.chat_gradient();
    let (input_start, input_end) = colors.input_gradient();

    // Fill entire background with border color to create thick border effect
    let background = Block::default().style(Style::default().bg(Color::Black));
    f.render_widget(background, f.size());

    // Inner area with margin to create thick border (2 chars on sides, 1 on top/bottom)
    let inner_area = f.size().inner(&Margin {
        horizontal: 2,
        vertical: 1,
    });

    let inner_bg = Block::default().style(Style::default().bg(ColorConfig::to_color(&colors.bg_primary)));
    f.render_widget(inner_bg, inner_area);

    // Chat messages, input box, key hints
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(INPUT_ROWS + 1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    render_messages(f, app, colors, chunks[0], chat_start, chat_end);
    render_input(f, app, colors, chunks[1], input_start, input_end);

    let help = Paragraph::new(Line::from(Span::styled(
        help_text(app.keyboard_enhanced),
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(help, chunks[2]);
}

/// Status text and color for the chat panel header.
pub fn status_indicator(app: &App, colors: &ColorConfig) -> (&'static str, Color) {
    if app.is_sending() {
        return ("● Sending...", ColorConfig::to_color(&colors.status_sending));
    }
    match app.backend_status {
        BackendStatus::Checking => ("● Connecting...", ColorConfig::to_color(&colors.status_sending)),
        BackendStatus::Reachable => ("● Ready", ColorConfig::to_color(&colors.status_ready)),
        BackendStatus::Unreachable => ("● Offline", ColorConfig::to_color(&colors.status_offline)),
    }
}

fn render_messages(
    f: &mut Frame,
    app: &mut App,
    colors: &ColorConfig,
    area: Rect,
    chat_start: (u8, u8, u8),
    chat_end: (u8, u8, u8),
) {
    // Leave one column on the right for the scrollbar
    let list_width = area.width.saturating_sub(3);
    let viewport = area.height.saturating_sub(2) as usize;

    let lines = conversation_lines(app.conversation.messages(), list_width, colors);
    app.scroll
        .sync(lines.len(), viewport, app.conversation.revision());

    let (status_text, status_color) = status_indicator(app, colors);
    let block = gradient_block_with_status(TITLE, status_text, status_color, chat_start, chat_end);

    let offset = u16::try_from(app.scroll.offset).unwrap_or(u16::MAX);
    let messages = Paragraph::new(lines).block(block).scroll((offset, 0));
    f.render_widget(messages, area);

    let scroll_position = if app.scroll.max_offset > 0 {
        app.scroll.offset as f32 / app.scroll.max_offset as f32
    } else {
        1.0
    };

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"))
        .track_symbol(Some("░"))
        .thumb_symbol("█")
        .style(Style::default().fg(gradient_color(chat_start, chat_end, scroll_position)));

    f.render_stateful_widget(
        scrollbar,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.scroll.scrollbar,
    );
}

/// Split the pending input into display lines, with the cursor drawn at
/// its char position.
pub fn input_lines(input: &str, cursor: usize, cursor_visible: bool) -> (Vec<Line<'static>>, usize) {
    let cursor_char = if cursor_visible { "▎" } else { " " };
    let cursor_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::SLOW_BLINK);

    if input.is_empty() {
        let line = Line::from(vec![
            Span::styled(cursor_char, cursor_style),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ]);
        return (vec![line], 0);
    }

    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut placed = false;
    // Chars before the current line, newlines included
    let mut seen = 0;

    for (row, text) in input.split('\n').enumerate() {
        let len = text.chars().count();
        if !placed && cursor <= seen + len {
            let column = cursor.saturating_sub(seen);
            let split: String = text.chars().take(column).collect();
            let rest: String = text.chars().skip(column).collect();
            lines.push(Line::from(vec![
                Span::raw(split),
                Span::styled(cursor_char, cursor_style),
                Span::raw(rest),
            ]));
            cursor_line = row;
            placed = true;
        } else {
            lines.push(Line::from(text.to_string()));
        }
        seen += len + 1;
    }

    (lines, cursor_line)
}

fn render_input(
    f: &mut Frame,
    app: &mut App,
    colors: &ColorConfig,
    area: Rect,
    input_start: (u8, u8, u8),
    input_end: (u8, u8, u8),
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(CONTROLS_WIDTH)])
        .split(area);

    let (lines, cursor_line) = input_lines(
        app.conversation.pending_input(),
        app.conversation.cursor(),
        app.animation.cursor_visible,
    );
    let rows = INPUT_ROWS as usize;
    let scroll = (cursor_line + 1).saturating_sub(rows) as u16;

    // Dark grey background, left border only with gradient color
    let input_block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(gradient_color(input_start, input_end, 0.5)))
        .style(Style::default().bg(ColorConfig::to_color(&colors.bg_input)));

    let input = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .block(input_block)
        .scroll((scroll, 0));
    f.render_widget(input, columns[0]);

    app.controls = render_controls(f, app.is_sending(), columns[1], input_start, input_end);
}

fn render_controls(
    f: &mut Frame,
    sending: bool,
    area: Rect,
    input_start: (u8, u8, u8),
    input_end: (u8, u8, u8),
) -> ControlLayout {
    let x = area.x.saturating_add(1);
    let width = area.width.saturating_sub(1);

    let (send_label, send_style) = if sending {
        (SENDING_LABEL, Style::default().fg(Color::DarkGray))
    } else {
        (
            SEND_LABEL,
            Style::default()
                .fg(gradient_color(input_start, input_end, 0.0))
                .add_modifier(Modifier::BOLD),
        )
    };

    let send = Rect::new(x, area.y, (display_width(send_label) as u16).min(width), area.height.min(1));
    let reset = Rect::new(
        x,
        area.y.saturating_add(1),
        (display_width(RESET_LABEL) as u16).min(width),
        area.height.saturating_sub(1).min(1),
    );

    f.render_widget(Paragraph::new(Span::styled(send_label, send_style)), send);
    f.render_widget(
        Paragraph::new(Span::styled(RESET_LABEL, Style::default().fg(Color::Gray))),
        reset,
    );

    ControlLayout { send, reset }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_help_text_follows_keyboard_support() {
        assert!(help_text(true).contains("Shift+Enter newline"));
        assert!(help_text(false).contains("Alt+Enter newline"));
        assert!(!help_text(false).contains("Shift"));
    }

    #[test]
    fn test_input_lines_placeholder_when_empty() {
        let (lines, cursor_line) = input_lines("", 0, true);
        assert_eq!(lines.len(), 1);
        assert_eq!(cursor_line, 0);
        assert!(line_text(&lines[0]).ends_with(PLACEHOLDER));
    }

    #[test]
    fn test_input_lines_cursor_mid_line() {
        let (lines, _) = input_lines("book", 2, true);
        assert_eq!(line_text(&lines[0]), "bo▎ok");
    }

    #[test]
    fn test_input_lines_cursor_on_second_line() {
        let (lines, cursor_line) = input_lines("ab\ncd", 4, true);
        assert_eq!(lines.len(), 2);
        assert_eq!(cursor_line, 1);
        assert_eq!(line_text(&lines[0]), "ab");
        assert_eq!(line_text(&lines[1]), "c▎d");
    }

    #[test]
    fn test_input_lines_cursor_at_line_end_stays_on_that_line() {
        let (lines, cursor_line) = input_lines("ab\ncd", 2, false);
        assert_eq!(cursor_line, 0);
        assert_eq!(line_text(&lines[0]), "ab ");
        assert_eq!(line_text(&lines[1]), "cd");
    }
}
