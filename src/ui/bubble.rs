//! Message bubbles: user messages hug the right edge, agent messages the
//! left, each at most three quarters of the list width.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::config::ColorConfig;
use crate::message::{Message, Origin};

use super::text::{display_width, wrap_text};

/// Horizontal padding inside a bubble, per side.
const BUBBLE_PADDING: usize = 1;

/// Widest text a bubble may hold for a list of the given width.
pub fn max_text_width(area_width: u16) -> usize {
    let bubble = (area_width as usize * 3) / 4;
    bubble.saturating_sub(BUBBLE_PADDING * 2).max(1)
}

fn bubble_style(origin: Origin, colors: &ColorConfig) -> Style {
    match origin {
        Origin::User => Style::default()
            .bg(ColorConfig::to_color(&colors.user_bubble_bg))
            .fg(ColorConfig::to_color(&colors.user_bubble_fg)),
        Origin::Agent => Style::default()
            .bg(ColorConfig::to_color(&colors.agent_bubble_bg))
            .fg(ColorConfig::to_color(&colors.agent_bubble_fg)),
    }
}

fn aligned(origin: Origin, area_width: usize, width: usize, spans: Vec<Span<'static>>) -> Line<'static> {
    match origin {
        Origin::User => {
            let indent = area_width.saturating_sub(width);
            let mut line = vec![Span::raw(" ".repeat(indent))];
            line.extend(spans);
            Line::from(line)
        }
        Origin::Agent => Line::from(spans),
    }
}

/// Lay out one message as a label line, the bubble body and a blank
/// separator line.
pub fn bubble_lines(message: &Message, area_width: u16, colors: &ColorConfig) -> Vec<Line<'static>> {
    let area = area_width as usize;
    let wrapped = wrap_text(&message.text, max_text_width(area_width));
    let inner = wrapped
        .iter()
        .map(|line| display_width(line))
        .max()
        .unwrap_or(0)
        .max(1);
    let bubble_width = inner + BUBBLE_PADDING * 2;
    let style = bubble_style(message.origin, colors);
    let pad = " ".repeat(BUBBLE_PADDING);

    let mut lines = Vec::with_capacity(wrapped.len() + 2);

    let label = message.origin.label();
    lines.push(aligned(
        message.origin,
        area,
        display_width(label),
        vec![Span::styled(
            label,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )],
    ));

    for text in wrapped {
        let fill = " ".repeat(inner - display_width(&text));
        let body = format!("{pad}{text}{fill}{pad}");
        lines.push(aligned(
            message.origin,
            area,
            bubble_width,
            vec![Span::styled(body, style)],
        ));
    }

    lines.push(Line::from(""));
    lines
}

/// Lay out the whole conversation.
pub fn conversation_lines(messages: &[Message], area_width: u16, colors: &ColorConfig) -> Vec<Line<'static>> {
    messages
        .iter()
        .flat_map(|message| bubble_lines(message, area_width, colors))
        .collect()
}
