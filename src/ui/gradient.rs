use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders},
};

/// Create a gradient color between two RGB values.
///
/// # Arguments
/// * `start` - Starting RGB color
/// * `end` - Ending RGB color
/// * `position` - Position in gradient (0.0 to 1.0)
pub fn gradient_color(start: (u8, u8, u8), end: (u8, u8, u8), position: f32) -> Color {
    let position = position.clamp(0.0, 1.0);
    let r = (start.0 as f32 + (end.0 as f32 - start.0 as f32) * position) as u8;
    let g = (start.1 as f32 + (end.1 as f32 - start.1 as f32) * position) as u8;
    let b = (start.2 as f32 + (end.2 as f32 - start.2 as f32) * position) as u8;
    Color::Rgb(r, g, b)
}

/// Bordered block with a gradient-colored title on the left and a status
/// indicator on the right.
pub fn gradient_block_with_status<'a>(
    title: &'a str,
    status: &'a str,
    status_color: Color,
    start: (u8, u8, u8),
    end: (u8, u8, u8),
) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(gradient_color(start, end, 0.5)))
        .title(Span::styled(
            title,
            Style::default()
                .fg(gradient_color(start, end, 0.0))
                .add_modifier(Modifier::BOLD),
        ))
        .title(
            Title::from(Line::from(Span::styled(
                format!(" {} ", status),
                Style::default().fg(status_color),
            )))
            .alignment(Alignment::Right),
        )
}
