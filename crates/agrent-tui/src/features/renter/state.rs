//! Renter tree state.

use agrent_core::api::{Booking, NewBooking, Vehicle, parse_booking_time};

use crate::common::{Field, ListState};

/// State for the renter screens.
#[derive(Debug, Default)]
pub struct RenterState {
    pub browse: ListState<Vehicle>,
    pub form: BookingForm,
    pub bookings: ListState<Booking>,
}

/// Booking request form for a chosen vehicle.
#[derive(Debug, Default)]
pub struct BookingForm {
    pub vehicle: Option<Vehicle>,
    pub start: Field,
    pub end: Field,
    pub focus: usize,
    pub busy: bool,
}

impl BookingForm {
    pub const FIELD_COUNT: usize = 2;

    /// Resets the form for a new vehicle.
    pub fn open_for(&mut self, vehicle: Vehicle) {
        *self = Self::default();
        self.vehicle = Some(vehicle);
    }

    pub fn focused_field_mut(&mut self) -> &mut Field {
        match self.focus {
            0 => &mut self.start,
            _ => &mut self.end,
        }
    }

    /// Validates the form and builds the booking payload.
    ///
    /// Accepts `YYYY-MM-DD HH:MM` or ISO `YYYY-MM-DDTHH:MM[:SS]`; times go
    /// to the server in ISO-8601 without timezone. Ordering and overlap
    /// checks stay server-side.
    ///
    /// # Errors
    /// Returns a user-facing message naming the problem.
    pub fn booking(&self) -> Result<NewBooking, String> {
        let vehicle = self
            .vehicle
            .as_ref()
            .ok_or_else(|| "No vehicle selected.".to_string())?;
        let start = parse_booking_time(self.start.trimmed())
            .ok_or_else(|| "Start time must look like 2026-08-10 09:00".to_string())?;
        let end = parse_booking_time(self.end.trimmed())
            .ok_or_else(|| "End time must look like 2026-08-12 18:00".to_string())?;
        Ok(NewBooking {
            vehicle_id: vehicle.id.clone(),
            start_time: start,
            end_time: end,
        })
    }
}
