//! Form rendering helpers shared by the login, signup, vehicle, and
//! booking screens.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Accent color used across all forms.
pub const ACCENT: Color = Color::Green;

/// Column where field values start (after the label gutter).
pub const VALUE_COLUMN: u16 = 12;

/// Centers a fixed-size card inside the content area.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

/// One "Label: value" form line, highlighted when focused.
pub fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{label:>10}: "), label_style),
        Span::raw(value.to_string()),
    ])
}

/// Dimmed key-hint line.
pub fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Places the terminal cursor inside a focused form field.
///
/// `row` is the line index within `inner`; the value starts after the
/// label gutter.
pub fn set_field_cursor(frame: &mut Frame, inner: Rect, row: u16, offset: u16) {
    let x = inner.x + VALUE_COLUMN + offset;
    let y = inner.y + row;
    if x < inner.x + inner.width && y < inner.y + inner.height {
        frame.set_cursor_position(Position::new(x, y));
    }
}
