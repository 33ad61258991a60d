//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use youtube_form::{FormField, ValidationError};

/// Rows taken by one field (top border + value + bottom border)
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a text input with its label, and the field error on the bottom border
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    value: &str,
    error: Option<&ValidationError>,
    is_active: bool,
    is_dirty: bool,
) {
    let border_style = match (is_active, error.is_some()) {
        (_, true) => Style::default().fg(Color::Red),
        (true, false) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let value_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display = if value.is_empty() && !is_active {
        Span::styled("(empty)", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(value, value_style)
    };
    let cursor = if is_active { "▌" } else { "" };

    let title = if is_dirty {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let content = Paragraph::new(Line::from(vec![
        display,
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    frame.render_widget(content.block(block), area);
}
