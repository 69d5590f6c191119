//! Renter feature reducer.

use agrent_core::api::BookingStatus;
use crossterm::event::{KeyCode, KeyEvent};

use crate::effects::UiEffect;
use crate::state::{AppState, Screen};

use super::state::BookingForm;

/// Handles a key press on one of the renter screens.
pub fn handle_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    match state.screen {
        Screen::Browse => browse_key(state, key),
        Screen::BookingForm => form_key(state, key),
        Screen::RenterBookings => bookings_key(state, key),
        _ => vec![],
    }
}

fn browse_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.renter.browse.select_next();
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.renter.browse.select_prev();
            vec![]
        }
        KeyCode::Char('r') => {
            state.renter.browse.loading = true;
            vec![UiEffect::LoadVehicles]
        }
        KeyCode::Enter | KeyCode::Char('b') => {
            let Some(vehicle) = state.renter.browse.selected_item() else {
                return vec![];
            };
            if !vehicle.availability {
                state.status.error("Vehicle not available for booking");
                return vec![];
            }
            let vehicle = vehicle.clone();
            state.renter.form.open_for(vehicle);
            state.go_to(Screen::BookingForm);
            vec![]
        }
        _ => vec![],
    }
}

fn form_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    let form = &mut state.renter.form;
    if form.busy {
        return vec![];
    }

    match key.code {
        KeyCode::Esc => {
            state.go_to(Screen::Browse);
            vec![]
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % BookingForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = (form.focus + BookingForm::FIELD_COUNT - 1) % BookingForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::Enter => {
            if form.focus + 1 < BookingForm::FIELD_COUNT {
                form.focus += 1;
                return vec![];
            }
            match form.booking() {
                Ok(booking) => {
                    form.busy = true;
                    state.status.info("Sending booking request...");
                    vec![UiEffect::CreateBooking {
                        booking,
                    }]
                }
                Err(message) => {
                    state.status.error(message);
                    vec![]
                }
            }
        }
        _ => {
            form.focused_field_mut().handle_key(key);
            vec![]
        }
    }
}

fn bookings_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.renter.bookings.select_next();
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.renter.bookings.select_prev();
            vec![]
        }
        KeyCode::Char('r') => {
            state.renter.bookings.loading = true;
            vec![UiEffect::LoadBookings]
        }
        KeyCode::Char('x') => {
            let Some(booking) = state.renter.bookings.selected_item() else {
                return vec![];
            };
            if !booking.status.is_active() {
                state
                    .status
                    .error("Cannot cancel a booking that is already cancelled or completed.");
                return vec![];
            }
            let id = booking.id.clone();
            state.status.info("Cancelling booking...");
            vec![UiEffect::SetBookingStatus {
                id,
                status: BookingStatus::Cancelled,
            }]
        }
        _ => vec![],
    }
}
