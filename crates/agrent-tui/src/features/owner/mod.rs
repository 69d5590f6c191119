//! Owner tree: dashboard, fleet management, booking decisions, tracking.

mod render;
mod state;
mod update;

pub use render::{
    booking_line, render_bookings, render_form, render_home, render_tracking, render_vehicles,
};
pub use state::{OwnerState, Overview, OverviewStats, VehicleForm};
pub use update::handle_key;
