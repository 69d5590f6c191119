//! Owner feature views.

use agrent_core::api::{Booking, BookingStatus, Vehicle};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::common::form;
use crate::state::AppState;

use super::state::VehicleForm;

/// Dashboard with fleet and booking stats plus recent requests.
pub fn render_home(state: &AppState, frame: &mut Frame, area: Rect) {
    let overview = &state.owner.overview;
    let block = Block::default().borders(Borders::ALL).title(" Dashboard ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if overview.loading && !overview.loaded {
        frame.render_widget(Paragraph::new("Loading..."), inner);
        return;
    }

    let stats = overview.stats();
    let [stats_area, recent_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(inner);

    let stat = |label: &str, value: usize, color: Color| {
        Line::from(vec![
            Span::styled(
                format!("{value:>4}  "),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(label.to_string()),
        ])
    };
    let lines = vec![
        stat("vehicles registered", stats.total_vehicles, Color::Green),
        stat("available now", stats.available, Color::Green),
        stat("active rentals", stats.active_rentals, Color::Yellow),
        stat("pending requests", stats.pending_requests, Color::Magenta),
    ];
    frame.render_widget(Paragraph::new(lines), stats_area);

    let mut recent: Vec<Line> = vec![Line::from(Span::styled(
        "Recent booking requests",
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))];
    for booking in overview.bookings.iter().take(8) {
        recent.push(booking_line(booking, false, true));
    }
    if overview.bookings.is_empty() {
        recent.push(Line::from(Span::styled(
            "No bookings yet.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(recent), recent_area);
}

/// Fleet list with status badges.
pub fn render_vehicles(state: &AppState, frame: &mut Frame, area: Rect) {
    let list = &state.owner.vehicles;
    let title = if list.loading {
        " My Vehicles (loading...) "
    } else {
        " My Vehicles "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.items.is_empty() {
        frame.render_widget(
            Paragraph::new("No vehicles yet. Press 'a' to add your first one."),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = list
        .items
        .iter()
        .enumerate()
        .map(|(i, vehicle)| ListItem::new(vehicle_line(vehicle, i == list.selected)))
        .collect();
    frame.render_widget(List::new(items), inner);
}

/// Add/edit vehicle form.
pub fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    let form = &state.owner.form;
    let title = if form.editing.is_some() {
        " Edit Vehicle "
    } else {
        " Add Vehicle "
    };
    let card = form::centered(area, 60, 13);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(title);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut lines = Vec::with_capacity(VehicleForm::FIELD_COUNT + 2);
    for i in 0..VehicleForm::FIELD_COUNT {
        lines.push(form::field_line(
            VehicleForm::LABELS[i],
            &form.field(i).display(),
            form.focus == i,
        ));
    }
    lines.push(Line::from(""));
    lines.push(form::hint_line(if form.busy {
        "Saving..."
    } else {
        "Enter: next/save · Esc: cancel"
    }));
    frame.render_widget(Paragraph::new(lines), inner);

    if !form.busy {
        form::set_field_cursor(
            frame,
            inner,
            form.focus as u16,
            form.field(form.focus).cursor_offset(),
        );
    }
}

/// Bookings for the owner's vehicles, with renter details.
pub fn render_bookings(state: &AppState, frame: &mut Frame, area: Rect) {
    let list = &state.owner.bookings;
    let title = if list.loading {
        " Bookings (loading...) "
    } else {
        " Bookings "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.items.is_empty() {
        frame.render_widget(Paragraph::new("No bookings for your vehicles yet."), inner);
        return;
    }

    let items: Vec<ListItem> = list
        .items
        .iter()
        .enumerate()
        .map(|(i, booking)| ListItem::new(booking_line(booking, i == list.selected, true)))
        .collect();
    frame.render_widget(List::new(items), inner);
}

/// Last known positions of vehicles under confirmed bookings.
pub fn render_tracking(state: &AppState, frame: &mut Frame, area: Rect) {
    let overview = &state.owner.overview;
    let title = if overview.loading {
        " Tracking (loading...) "
    } else {
        " Tracking "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tracked = overview.tracked();
    if tracked.is_empty() {
        frame.render_widget(
            Paragraph::new("No vehicles are out on a confirmed rental."),
            inner,
        );
        return;
    }

    let mut lines = Vec::new();
    for (vehicle, booking) in tracked {
        let position = vehicle.location.as_ref().map_or_else(
            || "position unknown".to_string(),
            |location| match location.coordinates() {
                Some((lat, lng)) => format!("{lat:.5}, {lng:.5}"),
                None => location.display(),
            },
        );
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<24}", vehicle.vehicle_name),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("● active  ", Style::default().fg(Color::Green)),
            Span::raw(position),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "    until {}",
                booking.end_time.format("%Y-%m-%d %H:%M")
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn vehicle_line(vehicle: &Vehicle, selected: bool) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let badge_color = if vehicle.availability {
        Color::Green
    } else {
        Color::Yellow
    };
    let price = format!("₹{:.0}/day", vehicle.rent_price);
    let mut spans = vec![
        Span::styled(
            format!("{marker}{:<24}", vehicle.vehicle_name),
            if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        ),
        Span::styled(
            format!("[{}] ", vehicle.display_status()),
            Style::default().fg(badge_color),
        ),
        Span::raw(format!("{:<12} {price}", vehicle.kind)),
    ];
    if let Some(location) = &vehicle.location {
        spans.push(Span::styled(
            format!("  {}", location.display()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

pub fn booking_line(booking: &Booking, selected: bool, with_renter: bool) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let mut spans = vec![
        Span::raw(format!("{marker}{:<20}", booking.vehicle_name())),
        Span::styled(
            format!("{:<10}", booking.status),
            Style::default().fg(status_color(booking.status)),
        ),
        Span::raw(format!(
            "{} → {}",
            booking.start_time.format("%m-%d %H:%M"),
            booking.end_time.format("%m-%d %H:%M")
        )),
    ];
    if with_renter && let Some(renter) = &booking.renter_details {
        let name = if renter.fullname.is_empty() {
            &renter.username
        } else {
            &renter.fullname
        };
        spans.push(Span::styled(
            format!("  by {name}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

pub fn status_color(status: BookingStatus) -> Color {
    match status {
        BookingStatus::Pending => Color::Yellow,
        BookingStatus::Confirmed => Color::Green,
        BookingStatus::Cancelled => Color::Red,
        BookingStatus::Completed => Color::Blue,
    }
}
