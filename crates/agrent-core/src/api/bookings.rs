//! Booking resources and calls.
//!
//! Renters create bookings and see their own; owners see bookings for their
//! vehicles and move them through the status lifecycle. Conflict detection
//! (overlap, availability) is entirely server-side.

use anyhow::Result;
use chrono::NaiveDateTime;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use super::vehicles::Vehicle;

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Whether the booking still occupies the vehicle.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renter contact details embedded in owner-side booking listings.
#[derive(Debug, Clone, Deserialize)]
pub struct RenterDetails {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub phone: String,
}

/// A booking as returned by the server.
///
/// `vehicle_details`/`renter_details` are denormalized by the server into
/// list responses; both are absent on freshly created bookings.
#[derive(Debug, Clone, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub vehicle_details: Option<Vehicle>,
    #[serde(default)]
    pub renter_details: Option<RenterDetails>,
}

impl Booking {
    /// Vehicle name for list views, when the server embedded it.
    pub fn vehicle_name(&self) -> &str {
        self.vehicle_details
            .as_ref()
            .map_or("(unknown vehicle)", |v| v.vehicle_name.as_str())
    }
}

/// Payload for `POST /bookings`. Times are ISO-8601 without timezone, which
/// is what the server's `fromisoformat` parsing expects.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub vehicle_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// Parses a user-entered booking time.
///
/// Accepts `YYYY-MM-DD HH:MM` or ISO `YYYY-MM-DDTHH:MM`, with optional
/// seconds. Ordering and overlap validation stay server-side.
pub fn parse_booking_time(input: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

impl ApiClient {
    /// Lists bookings (renter: own, owner: for own vehicles).
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.send_json(self.request(Method::GET, "/bookings")).await
    }

    /// Requests a booking (renter only); it starts out `pending`.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<String> {
        self.send_message(self.request(Method::POST, "/bookings").json(booking))
            .await
    }

    /// Moves a booking to a new status (owner: confirm/cancel/complete,
    /// renter: cancel own).
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn set_booking_status(&self, id: &str, status: BookingStatus) -> Result<String> {
        self.send_message(
            self.request(Method::PUT, &format!("/bookings/{id}"))
                .json(&serde_json::json!({ "status": status })),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_parses_server_shape() {
        let booking: Booking = serde_json::from_str(
            r#"{
                "_id": "b1",
                "vehicle_id": "v1",
                "start_time": "2026-08-10T09:00:00",
                "end_time": "2026-08-12T18:00:00",
                "status": "pending",
                "vehicle_details": {
                    "_id": "v1",
                    "vehicle_name": "Harvester",
                    "type": "harvester",
                    "rent_price": 2500.0
                }
            }"#,
        )
        .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.status.is_active());
        assert_eq!(booking.vehicle_name(), "Harvester");
    }

    #[test]
    fn booking_time_accepts_space_and_t_separators() {
        assert!(parse_booking_time("2026-08-10 09:00").is_some());
        assert!(parse_booking_time("2026-08-10T09:00:00").is_some());
        assert!(parse_booking_time("next tuesday").is_none());
    }

    #[test]
    fn new_booking_times_are_iso_without_timezone() {
        let booking = NewBooking {
            vehicle_id: "v1".to_string(),
            start_time: "2026-08-10T09:00:00".parse().unwrap(),
            end_time: "2026-08-12T18:00:00".parse().unwrap(),
        };
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["start_time"], "2026-08-10T09:00:00");
    }
}
