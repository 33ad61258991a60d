//! Channel sign-up form rendering

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::app::App;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use youtube_form::{FieldPath, FocusTarget, FormField};

/// Draw the form: profile fields on the left, phone list and actions on the right
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" YouTube Form ({}) ", app.render_count))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(inner);

    draw_profile_fields(frame, columns[0], app);
    draw_phone_list(frame, columns[1], app);
}

fn draw_input(frame: &mut Frame, area: Rect, app: &App, path: FieldPath) {
    let mut field = FormField::for_path(path);
    let value = app.store.get_value(path).unwrap_or_default();
    let is_active = app.is_focused(&FocusTarget::Field(field.clone()));
    if app.store.is_required(path) {
        field.label.push_str(" (required)");
    }
    draw_field(
        frame,
        area,
        &field,
        value,
        app.store.error(path),
        is_active,
        app.store.is_field_dirty(path),
    );
}

fn draw_profile_fields(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(FIELD_HEIGHT); FieldPath::STATIC.len()];
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (chunk, path) in chunks.iter().zip(FieldPath::STATIC) {
        draw_input(frame, *chunk, app, path);
    }
}

fn draw_phone_list(frame: &mut Frame, area: Rect, app: &App) {
    let entries = app.store.fields();

    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(entries.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.extend([
        Constraint::Length(BUTTON_HEIGHT), // Add phone number
        Constraint::Length(BUTTON_HEIGHT), // Submit
        Constraint::Min(0),                // Status
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        Paragraph::new("List of phone numbers").style(Style::default().fg(Color::Gray)),
        chunks[0],
    );

    for (index, _) in entries.iter().enumerate() {
        draw_input(frame, chunks[index + 1], app, FieldPath::PhNumber(index));
    }

    let add_area = chunks[entries.len() + 1];
    let submit_area = chunks[entries.len() + 2];
    let status_area = chunks[entries.len() + 3];

    render_button(
        frame,
        add_area,
        "Add phone number",
        app.is_focused(&FocusTarget::AddEntry),
        true,
        Color::Green,
    );
    render_button(
        frame,
        submit_area,
        "Submit",
        app.is_focused(&FocusTarget::Submit),
        app.store.can_submit(),
        Color::Cyan,
    );

    draw_status(frame, status_area, app);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![Line::from(Span::styled(
        "Tab/Shift+Tab move · Enter activate · Del remove entry · Ctrl+U clear · Ctrl+R reset · Esc quit",
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(message) = &app.status_message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    if let Some(values) = &app.submissions.last {
        let json = serde_json::to_string_pretty(values).unwrap_or_default();
        lines.extend(json.lines().map(|l| Line::from(l.to_string())));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
