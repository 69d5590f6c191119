//! Renter feature views.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::common::form;
use crate::features::owner::booking_line;
use crate::state::AppState;

use super::state::BookingForm;

/// Available vehicles to rent.
pub fn render_browse(state: &AppState, frame: &mut Frame, area: Rect) {
    let list = &state.renter.browse;
    let title = if list.loading {
        " Available Equipment (loading...) "
    } else {
        " Available Equipment "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.items.is_empty() {
        frame.render_widget(
            Paragraph::new("No equipment available right now. Press 'r' to refresh."),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = list
        .items
        .iter()
        .enumerate()
        .map(|(i, vehicle)| {
            let marker = if i == list.selected { "▸ " } else { "  " };
            let name_style = if i == list.selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::styled(format!("{marker}{:<24}", vehicle.vehicle_name), name_style),
                Span::raw(format!(
                    "{:<12} ₹{:.0}/day",
                    vehicle.kind, vehicle.rent_price
                )),
            ];
            if let Some(location) = &vehicle.location {
                spans.push(Span::styled(
                    format!("  {}", location.display()),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

/// Booking request form for the chosen vehicle.
pub fn render_booking_form(state: &AppState, frame: &mut Frame, area: Rect) {
    let booking_form = &state.renter.form;
    let card = form::centered(area, 60, 11);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(form::ACCENT))
        .title(" Request Booking ");
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let vehicle_line = booking_form.vehicle.as_ref().map_or_else(
        || Line::from("No vehicle selected."),
        |vehicle| {
            Line::from(vec![
                Span::styled(
                    vehicle.vehicle_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ₹{:.0}/day", vehicle.rent_price),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        },
    );

    let lines = vec![
        vehicle_line,
        Line::from(""),
        form::field_line("Start", &booking_form.start.display(), booking_form.focus == 0),
        form::field_line("End", &booking_form.end.display(), booking_form.focus == 1),
        Line::from(""),
        form::hint_line(if booking_form.busy {
            "Sending request..."
        } else {
            "Times as 2026-08-10 09:00 · Enter: next/send · Esc: back"
        }),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    if !booking_form.busy {
        let field = if booking_form.focus == 0 {
            &booking_form.start
        } else {
            &booking_form.end
        };
        set_form_cursor(frame, inner, booking_form, field.cursor_offset());
    }
}

fn set_form_cursor(frame: &mut Frame, inner: Rect, booking_form: &BookingForm, offset: u16) {
    form::set_field_cursor(frame, inner, 2 + booking_form.focus as u16, offset);
}

/// The renter's own bookings.
pub fn render_bookings(state: &AppState, frame: &mut Frame, area: Rect) {
    let list = &state.renter.bookings;
    let title = if list.loading {
        " My Bookings (loading...) "
    } else {
        " My Bookings "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if list.items.is_empty() {
        frame.render_widget(
            Paragraph::new("No bookings yet. Browse equipment and press Enter to book."),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = list
        .items
        .iter()
        .enumerate()
        .map(|(i, booking)| ListItem::new(booking_line(booking, i == list.selected, false)))
        .collect();
    frame.render_widget(List::new(items), inner);
}
