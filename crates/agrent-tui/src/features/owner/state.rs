//! Owner tree state.

use agrent_core::api::{Booking, BookingStatus, Vehicle, VehicleLocation, VehiclePayload};

use crate::common::{Field, ListState};

/// State for the owner screens.
#[derive(Debug, Default)]
pub struct OwnerState {
    pub overview: Overview,
    pub vehicles: ListState<Vehicle>,
    pub form: VehicleForm,
    pub bookings: ListState<Booking>,
    /// Vehicle id awaiting delete confirmation.
    pub pending_delete: Option<String>,
}

/// Vehicles and bookings fetched together, backing the dashboard and the
/// tracking screen.
#[derive(Debug, Default)]
pub struct Overview {
    pub vehicles: Vec<Vehicle>,
    pub bookings: Vec<Booking>,
    pub loading: bool,
    pub loaded: bool,
}

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, PartialEq, Eq)]
pub struct OverviewStats {
    pub total_vehicles: usize,
    pub available: usize,
    pub rented: usize,
    pub active_rentals: usize,
    pub pending_requests: usize,
}

impl Overview {
    pub fn set(&mut self, vehicles: Vec<Vehicle>, bookings: Vec<Booking>) {
        self.vehicles = vehicles;
        self.bookings = bookings;
        self.loading = false;
        self.loaded = true;
    }

    pub fn stats(&self) -> OverviewStats {
        let available = self.vehicles.iter().filter(|v| v.availability).count();
        OverviewStats {
            total_vehicles: self.vehicles.len(),
            available,
            rented: self.vehicles.len() - available,
            active_rentals: self
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Confirmed)
                .count(),
            pending_requests: self
                .bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
        }
    }

    /// Vehicles under a confirmed booking, paired with that booking, for
    /// the tracking screen.
    pub fn tracked(&self) -> Vec<(&Vehicle, &Booking)> {
        self.bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .filter_map(|booking| {
                let id = booking.vehicle_id.as_deref()?;
                let vehicle = self.vehicles.iter().find(|v| v.id == id)?;
                Some((vehicle, booking))
            })
            .collect()
    }
}

/// Add/edit vehicle form.
#[derive(Debug, Default)]
pub struct VehicleForm {
    /// Id of the vehicle being edited; None when adding.
    pub editing: Option<String>,
    pub name: Field,
    pub model: Field,
    pub kind: Field,
    pub price: Field,
    pub location: Field,
    pub image1: Field,
    pub image2: Field,
    pub focus: usize,
    pub busy: bool,
}

impl VehicleForm {
    pub const FIELD_COUNT: usize = 7;
    pub const LABELS: [&'static str; Self::FIELD_COUNT] = [
        "Name",
        "Model",
        "Type",
        "Price/day",
        "Location",
        "Image 1",
        "Image 2",
    ];

    pub fn field(&self, index: usize) -> &Field {
        match index {
            0 => &self.name,
            1 => &self.model,
            2 => &self.kind,
            3 => &self.price,
            4 => &self.location,
            5 => &self.image1,
            _ => &self.image2,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut Field {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.model,
            2 => &mut self.kind,
            3 => &mut self.price,
            4 => &mut self.location,
            5 => &mut self.image1,
            _ => &mut self.image2,
        }
    }

    /// Prefills the form from an existing vehicle for editing.
    pub fn load(&mut self, vehicle: &Vehicle) {
        *self = Self::default();
        self.editing = Some(vehicle.id.clone());
        self.name.set_value(&vehicle.vehicle_name);
        self.model.set_value(&vehicle.model);
        self.kind.set_value(&vehicle.kind);
        self.price.set_value(format!("{}", vehicle.rent_price));
        if let Some(location) = &vehicle.location {
            self.location.set_value(location.display());
        }
        self.image1.set_value(&vehicle.image1_url);
        self.image2.set_value(&vehicle.image2_url);
    }

    /// Validates the form and builds the create/update payload.
    ///
    /// # Errors
    /// Returns a user-facing message naming the problem.
    pub fn payload(&self) -> Result<VehiclePayload, String> {
        let missing: Vec<&str> = [
            (0, "name"),
            (2, "type"),
            (3, "price"),
            (4, "location"),
        ]
        .iter()
        .filter(|(i, _)| self.field(*i).trimmed().is_empty())
        .map(|(_, label)| *label)
        .collect();
        if !missing.is_empty() {
            return Err(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            ));
        }

        let price: f64 = self
            .price
            .trimmed()
            .parse()
            .map_err(|_| "Rent price must be a valid number".to_string())?;

        let optional = |field: &Field| {
            let value = field.trimmed();
            (!value.is_empty()).then(|| value.to_string())
        };

        Ok(VehiclePayload {
            vehicle_name: Some(self.name.trimmed().to_string()),
            model: optional(&self.model),
            kind: Some(self.kind.trimmed().to_string()),
            rent_price: Some(price),
            availability: None,
            image1_url: optional(&self.image1),
            image2_url: optional(&self.image2),
            location: Some(VehicleLocation::Address(self.location.trimmed().to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(id: &str, available: bool) -> Vehicle {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "vehicle_name": format!("vehicle-{id}"),
            "type": "tractor",
            "rent_price": 1000.0,
            "availability": available,
        }))
        .unwrap()
    }

    fn booking(vehicle_id: &str, status: BookingStatus) -> Booking {
        serde_json::from_value(serde_json::json!({
            "_id": format!("b-{vehicle_id}"),
            "vehicle_id": vehicle_id,
            "start_time": "2026-08-10T09:00:00",
            "end_time": "2026-08-12T18:00:00",
            "status": status.as_str(),
        }))
        .unwrap()
    }

    #[test]
    fn stats_count_by_flag_and_status() {
        let mut overview = Overview::default();
        overview.set(
            vec![vehicle("v1", true), vehicle("v2", false)],
            vec![
                booking("v2", BookingStatus::Confirmed),
                booking("v1", BookingStatus::Pending),
                booking("v1", BookingStatus::Cancelled),
            ],
        );

        let stats = overview.stats();
        assert_eq!(stats.total_vehicles, 2);
        assert_eq!(stats.available, 1);
        assert_eq!(stats.rented, 1);
        assert_eq!(stats.active_rentals, 1);
        assert_eq!(stats.pending_requests, 1);
    }

    #[test]
    fn tracked_joins_confirmed_bookings_to_vehicles() {
        let mut overview = Overview::default();
        overview.set(
            vec![vehicle("v1", true), vehicle("v2", false)],
            vec![
                booking("v2", BookingStatus::Confirmed),
                booking("v1", BookingStatus::Pending),
                booking("gone", BookingStatus::Confirmed),
            ],
        );

        let tracked = overview.tracked();
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].0.id, "v2");
    }

    #[test]
    fn form_payload_requires_fields_and_numeric_price() {
        let mut form = VehicleForm::default();
        let err = form.payload().unwrap_err();
        assert!(err.contains("name"));

        form.name.set_value("Tractor");
        form.kind.set_value("tractor");
        form.price.set_value("not-a-number");
        form.location.set_value("Warangal");
        assert_eq!(
            form.payload().unwrap_err(),
            "Rent price must be a valid number"
        );

        form.price.set_value("1200.5");
        let payload = form.payload().unwrap();
        assert_eq!(payload.rent_price, Some(1200.5));
        assert!(payload.model.is_none());
    }
}
