//! Booking commands.

use agrent_core::api::{BookingStatus, NewBooking, parse_booking_time};
use agrent_core::config::Config;
use anyhow::Result;

use super::build_client;

pub async fn list(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let bookings = client.list_bookings().await?;
    if bookings.is_empty() {
        println!("No bookings.");
        return Ok(());
    }
    for booking in &bookings {
        let renter = booking.renter_details.as_ref().map_or(String::new(), |r| {
            let name = if r.fullname.is_empty() {
                &r.username
            } else {
                &r.fullname
            };
            format!("  by {name}")
        });
        println!(
            "{:<26} {:<10} {:<20} {} → {}{renter}",
            booking.id,
            booking.status,
            booking.vehicle_name(),
            booking.start_time.format("%Y-%m-%d %H:%M"),
            booking.end_time.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

pub async fn create(config: &Config, vehicle_id: &str, from: &str, to: &str) -> Result<()> {
    let start_time = parse_booking_time(from)
        .ok_or_else(|| anyhow::anyhow!("Invalid start time {from:?}. Use e.g. \"2026-08-10 09:00\"."))?;
    let end_time = parse_booking_time(to)
        .ok_or_else(|| anyhow::anyhow!("Invalid end time {to:?}. Use e.g. \"2026-08-12 18:00\"."))?;

    let client = build_client(config)?;
    let message = client
        .create_booking(&NewBooking {
            vehicle_id: vehicle_id.to_string(),
            start_time,
            end_time,
        })
        .await?;
    println!("{message}");
    Ok(())
}

pub async fn set_status(config: &Config, id: &str, status: BookingStatus) -> Result<()> {
    let client = build_client(config)?;
    let message = client.set_booking_status(id, status).await?;
    println!("{message}");
    Ok(())
}
