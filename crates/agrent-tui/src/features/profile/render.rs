//! Profile screen view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::state::AppState;

/// Account details and counts, with the logout hint.
pub fn render(state: &AppState, frame: &mut Frame, area: Rect) {
    let profile = &state.profile;
    let title = if profile.loading {
        " Profile (loading...) "
    } else {
        " Profile "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(overview) = &profile.overview else {
        frame.render_widget(Paragraph::new("Loading profile..."), inner);
        return;
    };

    let detail = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(
                format!("{label:>10}: "),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(value.to_string()),
        ])
    };

    let user = &overview.profile;
    let role = user.role.map_or("not set", |role| role.as_str());
    let member_since = user.created_at.map_or_else(
        || "-".to_string(),
        |created| created.format("%Y-%m-%d").to_string(),
    );

    let lines = vec![
        Line::from(Span::styled(
            if user.fullname.is_empty() {
                user.username.clone()
            } else {
                user.fullname.clone()
            },
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        detail("Username", &user.username),
        detail("Role", role),
        detail("Phone", &user.phone),
        detail("Address", &user.address),
        detail("Since", &member_since),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{:>4}  ", overview.vehicle_count),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("vehicles"),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{:>4}  ", overview.booking_count),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("bookings"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "r: refresh · l: logout",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
