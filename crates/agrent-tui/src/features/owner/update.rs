//! Owner feature reducer.

use agrent_core::api::{BookingStatus, VehiclePayload};
use crossterm::event::{KeyCode, KeyEvent};

use crate::effects::UiEffect;
use crate::state::{AppState, Screen};

use super::state::VehicleForm;

/// Handles a key press on one of the owner screens.
pub fn handle_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    match state.screen {
        Screen::OwnerHome | Screen::Tracking => overview_key(state, key),
        Screen::OwnerVehicles => vehicles_key(state, key),
        Screen::VehicleForm => form_key(state, key),
        Screen::OwnerBookings => bookings_key(state, key),
        _ => vec![],
    }
}

fn overview_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('r') => {
            state.owner.overview.loading = true;
            vec![UiEffect::LoadOverview]
        }
        _ => vec![],
    }
}

fn vehicles_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    // Delete confirmation intercepts everything until answered.
    if let Some(id) = state.owner.pending_delete.clone() {
        return match key.code {
            KeyCode::Char('y') => {
                state.status.info("Deleting vehicle...");
                vec![UiEffect::DeleteVehicle {
                    id,
                }]
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                state.owner.pending_delete = None;
                state.status.clear();
                vec![]
            }
            _ => vec![],
        };
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.owner.vehicles.select_next();
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.owner.vehicles.select_prev();
            vec![]
        }
        KeyCode::Char('r') => {
            state.owner.vehicles.loading = true;
            vec![UiEffect::LoadVehicles]
        }
        KeyCode::Char('a') => {
            state.owner.form = VehicleForm::default();
            state.go_to(Screen::VehicleForm);
            vec![]
        }
        KeyCode::Char('e') => {
            if let Some(vehicle) = state.owner.vehicles.selected_item() {
                let vehicle = vehicle.clone();
                state.owner.form.load(&vehicle);
                state.go_to(Screen::VehicleForm);
            }
            vec![]
        }
        KeyCode::Char('p') => {
            // Pause/activate: flip only the availability flag.
            let Some(vehicle) = state.owner.vehicles.selected_item() else {
                return vec![];
            };
            let id = vehicle.id.clone();
            let available = !vehicle.availability;
            state.status.info(if available {
                "Activating vehicle..."
            } else {
                "Pausing vehicle..."
            });
            vec![UiEffect::SaveVehicle {
                id: Some(id),
                payload: VehiclePayload::availability(available),
            }]
        }
        KeyCode::Char('d') => {
            if let Some(vehicle) = state.owner.vehicles.selected_item() {
                state.owner.pending_delete = Some(vehicle.id.clone());
                state.status.error(format!(
                    "Delete {}? This cannot be undone. (y/n)",
                    vehicle.vehicle_name
                ));
            }
            vec![]
        }
        _ => vec![],
    }
}

fn form_key(state: &mut AppState, key: &KeyEvent) -> Vec<UiEffect> {
    let form = &mut state.owner.form;
    if form.busy {
        return vec![];
    }

    match key.code {
        KeyCode::Esc => {
            state.go_to(Screen::OwnerVehicles);
            vec![]
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus = (form.focus + 1) % VehicleForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = (form.focus + VehicleForm::FIELD_COUNT - 1) % VehicleForm::FIELD_COUNT;
            vec![]
        }
        KeyCode::Enter => {
            if form.focus + 1 < VehicleForm::FIELD_COUNT {
                form.focus += 1;
                return vec![];
            }
            match form.payload() {
                Ok(payload) => {
                    form.busy = true;
                    let id = form.editing.clone();
                    state.status.info(if id.is_some() {
                        "Updating vehicle..."
                    } else {
                        "Adding vehicle..."
                    });
                    vec![UiEffect::SaveVehicle {
                        id,
                        payload,
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
            state.owner.bookings.select_next();
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.owner.bookings.select_prev();
            vec![]
        }
        KeyCode::Char('r') => {
            state.owner.bookings.loading = true;
            vec![UiEffect::LoadBookings]
        }
        KeyCode::Char('c') => set_status_if(state, BookingStatus::Pending, BookingStatus::Confirmed),
        KeyCode::Char('x') => {
            let Some(booking) = state.owner.bookings.selected_item() else {
                return vec![];
            };
            if !booking.status.is_active() {
                state.status.error("Only pending or confirmed bookings can be cancelled.");
                return vec![];
            }
            let id = booking.id.clone();
            state.status.info("Cancelling booking...");
            vec![UiEffect::SetBookingStatus {
                id,
                status: BookingStatus::Cancelled,
            }]
        }
        KeyCode::Char('f') => set_status_if(state, BookingStatus::Confirmed, BookingStatus::Completed),
        _ => vec![],
    }
}

/// Emits a status transition when the selected booking is in `from`.
fn set_status_if(
    state: &mut AppState,
    from: BookingStatus,
    to: BookingStatus,
) -> Vec<UiEffect> {
    let Some(booking) = state.owner.bookings.selected_item() else {
        return vec![];
    };
    if booking.status != from {
        state
            .status
            .error(format!("Only {from} bookings can be marked {to}."));
        return vec![];
    }
    let id = booking.id.clone();
    state.status.info(format!("Marking booking {to}..."));
    vec![UiEffect::SetBookingStatus {
        id,
        status: to,
    }]
}
