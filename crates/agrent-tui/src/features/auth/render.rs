//! Auth feature views.

use agrent_core::session::Role;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::form::{ACCENT, centered, field_line, hint_line, set_field_cursor};
use crate::state::{AppState, Screen};

use super::state::SignupForm;

/// Renders the active unauthenticated screen.
pub fn render(state: &AppState, frame: &mut Frame, area: Rect) {
    match state.screen {
        Screen::Login => render_login(state, frame, area),
        Screen::Signup => render_signup(state, frame, area),
        Screen::RoleSelect => render_role_select(state, frame, area),
        _ => {}
    }
}

fn render_login(state: &AppState, frame: &mut Frame, area: Rect) {
    let form = &state.auth.login;
    let card = centered(area, 52, 10);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Smart Agri Rental ");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let fields = [("Username", &form.username), ("Password", &form.password)];
    let mut lines = vec![
        Line::from(Span::styled(
            "Login to your account",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for (i, (label, field)) in fields.iter().enumerate() {
        lines.push(field_line(label, &field.display(), form.focus == i));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(if form.busy {
        "Logging in..."
    } else {
        "Enter: login · Ctrl+N: sign up · Ctrl+C: quit"
    }));
    frame.render_widget(Paragraph::new(lines), inner);

    if !form.busy {
        let field = if form.focus == 0 {
            &form.username
        } else {
            &form.password
        };
        set_field_cursor(frame, inner, 2 + form.focus as u16, field.cursor_offset());
    }
}

fn render_signup(state: &AppState, frame: &mut Frame, area: Rect) {
    let form = &state.auth.signup;
    let card = centered(area, 56, 13);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Create Account ");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut lines = vec![
        Line::from(Span::styled(
            "Join the marketplace",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    for i in 0..SignupForm::FIELD_COUNT {
        lines.push(field_line(
            SignupForm::LABELS[i],
            &form.field(i).display(),
            form.focus == i,
        ));
    }
    lines.push(Line::from(""));
    lines.push(hint_line(if form.busy {
        "Creating account..."
    } else {
        "Enter: next/submit · Ctrl+L: back to login"
    }));
    frame.render_widget(Paragraph::new(lines), inner);

    if !form.busy {
        set_field_cursor(
            frame,
            inner,
            2 + form.focus as u16,
            form.field(form.focus).cursor_offset(),
        );
    }
}

fn render_role_select(state: &AppState, frame: &mut Frame, area: Rect) {
    let select = &state.auth.role_select;
    let card = centered(area, 56, 11);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Choose Your Role ");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let who = select
        .username
        .as_deref()
        .map_or(String::new(), |u| format!(" for {u}"));

    let option = |role: Role, label: &str, detail: &str| {
        let selected = select.selected == role;
        let marker = if selected { "▸" } else { " " };
        let style = if selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!(" {marker} {label} "), style),
            Span::styled(format!("— {detail}"), Style::default().fg(Color::DarkGray)),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Select a role{who}. This cannot be changed later."),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        option(Role::Owner, "Owner ", "list your equipment for rent"),
        option(Role::Renter, "Renter", "rent equipment from owners"),
        Line::from(""),
        hint_line(if select.busy {
            "Saving your role..."
        } else {
            "↑/↓: choose · Enter: confirm · Esc: back"
        }),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
