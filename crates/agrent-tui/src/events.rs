//! UI event types.
//!
//! All external inputs (terminal, session notifications, async API results)
//! are converted to [`UiEvent`] before being processed by the reducer.
//! Async handlers send their result events to the runtime's inbox; the
//! runtime drains the inbox each frame.

use agrent_core::api::{Booking, LoginOutcome, UserProfile, Vehicle};
use agrent_core::session::Session;
use crossterm::event::Event as CrosstermEvent;

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Idle tick (no other event arrived this frame).
    Tick,
    /// Raw terminal input.
    Terminal(CrosstermEvent),
    /// The session store published a change (login, logout, role exchange).
    SessionChanged(Session),
    /// Auth flow results.
    Auth(AuthUiEvent),
    /// Data fetch/mutation results.
    Data(DataUiEvent),
}

/// Results of the auth flows. Errors are display strings, already reduced
/// to the server message or a generic fallback.
#[derive(Debug)]
pub enum AuthUiEvent {
    LoginFinished(Result<LoginOutcome, String>),
    /// Ok carries the server's confirmation message.
    SignupFinished(Result<String, String>),
    RoleSelected(Result<String, String>),
}

/// Results of data operations. Ok payloads replace screen state; errors
/// leave prior on-screen state unchanged and surface in the status line.
#[derive(Debug)]
pub enum DataUiEvent {
    Vehicles(Result<Vec<Vehicle>, String>),
    VehicleSaved(Result<String, String>),
    VehicleDeleted(Result<String, String>),
    Bookings(Result<Vec<Booking>, String>),
    BookingCreated(Result<String, String>),
    BookingUpdated(Result<String, String>),
    /// Vehicles and bookings fetched together for the owner dashboard and
    /// tracking screens.
    Overview(Result<(Vec<Vehicle>, Vec<Booking>), String>),
    Profile(Result<ProfileOverview, String>),
}

/// Profile screen payload: profile plus counts, fetched concurrently and
/// awaited together before rendering.
#[derive(Debug)]
pub struct ProfileOverview {
    pub profile: UserProfile,
    pub vehicle_count: usize,
    pub booking_count: usize,
}
