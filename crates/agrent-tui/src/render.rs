//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui Frame, and never mutate state or return effects. The screen
//! tree chosen by the gate decides which feature view is mounted.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{auth, owner, profile, renter};
use crate::state::{AppState, Screen, ScreenTree, Severity};

/// Height of the header (title + tab bar).
const HEADER_HEIGHT: u16 = 2;

/// Height of the status line below the content.
const STATUS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let [header_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    render_header(state, frame, header_area);

    match state.screen {
        Screen::Login | Screen::Signup | Screen::RoleSelect => {
            auth::render(state, frame, content_area);
        }
        Screen::OwnerHome => owner::render_home(state, frame, content_area),
        Screen::OwnerVehicles => owner::render_vehicles(state, frame, content_area),
        Screen::VehicleForm => owner::render_form(state, frame, content_area),
        Screen::OwnerBookings => owner::render_bookings(state, frame, content_area),
        Screen::Tracking => owner::render_tracking(state, frame, content_area),
        Screen::Browse => renter::render_browse(state, frame, content_area),
        Screen::BookingForm => renter::render_booking_form(state, frame, content_area),
        Screen::RenterBookings => renter::render_bookings(state, frame, content_area),
        Screen::Profile => profile::render(state, frame, content_area),
    }

    render_status(state, frame, status_area);
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let tree = state.tree();
    let [title_area, tabs_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let who = match (&state.session.username, &state.session.role) {
        (Some(username), _) => username.clone(),
        (None, Some(role)) => role.as_str().to_string(),
        (None, None) => String::new(),
    };
    let title = Line::from(vec![
        Span::styled(
            " agrent ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "— agricultural equipment rental",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    if tree == ScreenTree::Unauthenticated {
        return;
    }

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (screen, label)) in tree.tabs().iter().enumerate() {
        let active = *screen == state.screen;
        let style = if active {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{} {label}", i + 1), style));
        spans.push(Span::raw("   "));
    }
    if !who.is_empty() {
        spans.push(Span::styled(
            format!("({who})"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), tabs_area);
}

fn render_status(state: &AppState, frame: &mut Frame, area: Rect) {
    let line = match &state.status.message {
        Some((Severity::Error, text)) => Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(Color::Red),
        )),
        Some((Severity::Info, text)) => Line::from(Span::styled(
            format!(" {text}"),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            default_hints(state),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Per-screen key hints shown while no status message is active.
fn default_hints(state: &AppState) -> &'static str {
    match state.screen {
        Screen::Login | Screen::Signup | Screen::RoleSelect => "",
        Screen::OwnerHome => " Tab: next screen · r: refresh · q: quit",
        Screen::OwnerVehicles => {
            " ↑/↓: select · a: add · e: edit · p: pause/activate · d: delete · r: refresh · q: quit"
        }
        Screen::VehicleForm | Screen::BookingForm => " Esc: back",
        Screen::OwnerBookings => {
            " ↑/↓: select · c: confirm · x: cancel · f: complete · r: refresh · q: quit"
        }
        Screen::Tracking => " r: refresh · q: quit",
        Screen::Browse => " ↑/↓: select · Enter: book · r: refresh · q: quit",
        Screen::RenterBookings => " ↑/↓: select · x: cancel · r: refresh · q: quit",
        Screen::Profile => " r: refresh · l: logout · q: quit",
    }
}
