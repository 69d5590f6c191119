//! Renter tree: browse available vehicles, request bookings, track them.

mod render;
mod state;
mod update;

pub use render::{render_booking_form, render_bookings, render_browse};
pub use state::{BookingForm, RenterState};
pub use update::handle_key;
