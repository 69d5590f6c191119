//! Effect handlers for the TUI runtime.
//!
//! Pure async functions that perform one API interaction and return the
//! result as a [`UiEvent`]. The runtime spawns them and sends results to
//! the inbox; they never touch UI state. Errors are reduced to the display
//! string the status line shows (the server message or a generic fallback).

use std::sync::Arc;

use agrent_core::api::{ApiClient, BookingStatus, NewBooking, Registration, VehiclePayload};
use agrent_core::session::Role;

use crate::events::{AuthUiEvent, DataUiEvent, ProfileOverview, UiEvent};

fn display(err: &anyhow::Error) -> String {
    err.to_string()
}

pub async fn login(client: Arc<ApiClient>, username: String, password: String) -> UiEvent {
    let result = client
        .login(&username, &password)
        .await
        .map_err(|e| display(&e));
    UiEvent::Auth(AuthUiEvent::LoginFinished(result))
}

pub async fn signup(client: Arc<ApiClient>, registration: Registration) -> UiEvent {
    let result = client
        .register(&registration)
        .await
        .map(|reply| reply.message)
        .map_err(|e| display(&e));
    UiEvent::Auth(AuthUiEvent::SignupFinished(result))
}

pub async fn select_role(client: Arc<ApiClient>, role: Role) -> UiEvent {
    let result = client.select_role(role).await.map_err(|e| display(&e));
    UiEvent::Auth(AuthUiEvent::RoleSelected(result))
}

pub async fn load_vehicles(client: Arc<ApiClient>) -> UiEvent {
    let result = client.list_vehicles().await.map_err(|e| display(&e));
    UiEvent::Data(DataUiEvent::Vehicles(result))
}

pub async fn save_vehicle(
    client: Arc<ApiClient>,
    id: Option<String>,
    payload: VehiclePayload,
) -> UiEvent {
    let result = match id {
        Some(id) => client.update_vehicle(&id, &payload).await,
        None => client.add_vehicle(&payload).await,
    }
    .map_err(|e| display(&e));
    UiEvent::Data(DataUiEvent::VehicleSaved(result))
}

pub async fn delete_vehicle(client: Arc<ApiClient>, id: String) -> UiEvent {
    let result = client.delete_vehicle(&id).await.map_err(|e| display(&e));
    UiEvent::Data(DataUiEvent::VehicleDeleted(result))
}

pub async fn load_bookings(client: Arc<ApiClient>) -> UiEvent {
    let result = client.list_bookings().await.map_err(|e| display(&e));
    UiEvent::Data(DataUiEvent::Bookings(result))
}

pub async fn create_booking(client: Arc<ApiClient>, booking: NewBooking) -> UiEvent {
    let result = client
        .create_booking(&booking)
        .await
        .map_err(|e| display(&e));
    UiEvent::Data(DataUiEvent::BookingCreated(result))
}

pub async fn set_booking_status(
    client: Arc<ApiClient>,
    id: String,
    status: BookingStatus,
) -> UiEvent {
    let result = client
        .set_booking_status(&id, status)
        .await
        .map_err(|e| display(&e));
    UiEvent::Data(DataUiEvent::BookingUpdated(result))
}

/// Vehicles and bookings together, for the dashboard and tracking screens.
pub async fn load_overview(client: Arc<ApiClient>) -> UiEvent {
    let (vehicles, bookings) = tokio::join!(client.list_vehicles(), client.list_bookings());
    let result = match (vehicles, bookings) {
        (Ok(vehicles), Ok(bookings)) => Ok((vehicles, bookings)),
        (Err(e), _) | (_, Err(e)) => Err(display(&e)),
    };
    UiEvent::Data(DataUiEvent::Overview(result))
}

/// Profile, vehicles, and bookings issued in parallel and awaited together
/// before the screen renders anything.
pub async fn load_profile(client: Arc<ApiClient>) -> UiEvent {
    let (profile, vehicles, bookings) = tokio::join!(
        client.get_profile(),
        client.list_vehicles(),
        client.list_bookings()
    );
    let result = match (profile, vehicles, bookings) {
        (Ok(profile), Ok(vehicles), Ok(bookings)) => Ok(ProfileOverview {
            profile,
            vehicle_count: vehicles.len(),
            booking_count: bookings.len(),
        }),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(display(&e)),
    };
    UiEvent::Data(DataUiEvent::Profile(result))
}
