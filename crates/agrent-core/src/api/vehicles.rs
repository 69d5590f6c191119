//! Vehicle resources and CRUD calls.
//!
//! Vehicles are remote resources fetched and discarded per screen; nothing
//! is cached locally. Owners see their own fleet, renters see what is
//! available — that split lives on the server.

use anyhow::Result;
use chrono::NaiveDateTime;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ApiClient;

/// Last known position of a vehicle.
///
/// Older rows store a free-form address string instead of coordinates, so
/// both shapes deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleLocation {
    Point {
        latitude: f64,
        longitude: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<NaiveDateTime>,
    },
    Address(String),
}

impl VehicleLocation {
    /// Human-readable location line for list views.
    pub fn display(&self) -> String {
        match self {
            VehicleLocation::Point {
                latitude,
                longitude,
                address,
                ..
            } => match address {
                Some(address) => address.clone(),
                None => format!("{latitude:.5}, {longitude:.5}"),
            },
            VehicleLocation::Address(address) => address.clone(),
        }
    }

    /// Coordinates, when the row has them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self {
            VehicleLocation::Point {
                latitude,
                longitude,
                ..
            } => Some((*latitude, *longitude)),
            VehicleLocation::Address(_) => None,
        }
    }
}

/// A vehicle as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "_id")]
    pub id: String,
    pub vehicle_name: String,
    #[serde(default)]
    pub model: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub rent_price: f64,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    pub image1_url: String,
    #[serde(default)]
    pub image2_url: String,
    #[serde(default)]
    pub location: Option<VehicleLocation>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

fn default_availability() -> bool {
    true
}

impl Vehicle {
    /// Display status derived from the availability flag.
    ///
    /// Booking truth stays server-side; nothing gates behavior on this.
    pub fn display_status(&self) -> &'static str {
        if self.availability {
            "available"
        } else {
            "rented"
        }
    }
}

/// Create/update payload for a vehicle.
///
/// All fields optional so partial updates (e.g. toggling availability)
/// reuse the same type; the server validates required fields on create.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VehiclePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image1_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image2_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<VehicleLocation>,
}

impl VehiclePayload {
    /// Payload that only flips the availability flag (pause/activate).
    pub fn availability(available: bool) -> Self {
        Self {
            availability: Some(available),
            ..Self::default()
        }
    }
}

impl ApiClient {
    /// Lists vehicles (owner: own fleet, renter: available vehicles).
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.send_json(self.request(Method::GET, "/vehicles")).await
    }

    /// Fetches a single vehicle by id.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn get_vehicle(&self, id: &str) -> Result<Vehicle> {
        self.send_json(self.request(Method::GET, &format!("/vehicles/{id}")))
            .await
    }

    /// Registers a new vehicle (owner only).
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn add_vehicle(&self, payload: &VehiclePayload) -> Result<String> {
        self.send_message(self.request(Method::POST, "/vehicles").json(payload))
            .await
    }

    /// Updates a vehicle; omitted fields are left unchanged.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn update_vehicle(&self, id: &str, payload: &VehiclePayload) -> Result<String> {
        self.send_message(
            self.request(Method::PUT, &format!("/vehicles/{id}"))
                .json(payload),
        )
        .await
    }

    /// Deletes a vehicle (rejected server-side while bookings are active).
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn delete_vehicle(&self, id: &str) -> Result<String> {
        self.send_message(self.request(Method::DELETE, &format!("/vehicles/{id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_accepts_coordinates_and_strings() {
        let point: VehicleLocation =
            serde_json::from_str(r#"{"latitude": 17.4, "longitude": 78.5, "address": "Warangal"}"#)
                .unwrap();
        assert_eq!(point.coordinates(), Some((17.4, 78.5)));
        assert_eq!(point.display(), "Warangal");

        let legacy: VehicleLocation = serde_json::from_str(r#""Near the market road""#).unwrap();
        assert_eq!(legacy.coordinates(), None);
        assert_eq!(legacy.display(), "Near the market road");
    }

    #[test]
    fn vehicle_defaults_to_available() {
        let vehicle: Vehicle = serde_json::from_str(
            r#"{"_id": "v1", "vehicle_name": "Tractor", "type": "tractor", "rent_price": 1200.0}"#,
        )
        .unwrap();
        assert!(vehicle.availability);
        assert_eq!(vehicle.display_status(), "available");
    }

    #[test]
    fn availability_payload_serializes_only_the_flag() {
        let json = serde_json::to_value(VehiclePayload::availability(false)).unwrap();
        assert_eq!(json, serde_json::json!({"availability": false}));
    }
}
