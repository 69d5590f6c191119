//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only: the reducer stays pure, mutating state and
//! returning effects, never touching the network or the session file
//! directly.

use agrent_core::api::{BookingStatus, NewBooking, Registration, VehiclePayload};
use agrent_core::session::Role;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Attempt a login with the submitted credentials.
    Login { username: String, password: String },

    /// Register a new account.
    Signup { registration: Registration },

    /// Exchange the stored temporary token for a final token.
    SelectRole { role: Role },

    /// Clear the persisted session.
    Logout,

    /// Fetch the vehicle list for the current tree.
    LoadVehicles,

    /// Create (`id` None) or update (`id` Some) a vehicle.
    SaveVehicle {
        id: Option<String>,
        payload: VehiclePayload,
    },

    /// Delete a vehicle.
    DeleteVehicle { id: String },

    /// Fetch the booking list for the current tree.
    LoadBookings,

    /// Request a new booking.
    CreateBooking { booking: NewBooking },

    /// Move a booking to a new status.
    SetBookingStatus { id: String, status: BookingStatus },

    /// Fetch vehicles and bookings together (owner dashboard/tracking).
    LoadOverview,

    /// Fetch profile, vehicles, and bookings together.
    LoadProfile,
}
