//! Vehicle commands.

use agrent_core::api::{Vehicle, VehicleLocation, VehiclePayload};
use agrent_core::config::Config;
use anyhow::Result;

use super::build_client;

pub struct AddArgs {
    pub name: String,
    pub model: Option<String>,
    pub kind: String,
    pub price: f64,
    pub location: String,
    pub image1: Option<String>,
    pub image2: Option<String>,
}

fn print_vehicle_row(vehicle: &Vehicle) {
    let location = vehicle
        .location
        .as_ref()
        .map_or(String::new(), VehicleLocation::display);
    println!(
        "{:<26} {:<12} {:<10} {:>10}  {}",
        vehicle.id,
        vehicle.kind,
        vehicle.display_status(),
        format!("{:.0}/day", vehicle.rent_price),
        if location.is_empty() {
            vehicle.vehicle_name.clone()
        } else {
            format!("{} — {location}", vehicle.vehicle_name)
        }
    );
}

pub async fn list(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let vehicles = client.list_vehicles().await?;
    if vehicles.is_empty() {
        println!("No vehicles.");
        return Ok(());
    }
    for vehicle in &vehicles {
        print_vehicle_row(vehicle);
    }
    Ok(())
}

pub async fn show(config: &Config, id: &str) -> Result<()> {
    let client = build_client(config)?;
    let vehicle = client.get_vehicle(id).await?;
    println!("{}", vehicle.vehicle_name);
    println!("  id:        {}", vehicle.id);
    println!("  model:     {}", vehicle.model);
    println!("  type:      {}", vehicle.kind);
    println!("  price:     {:.2}/day", vehicle.rent_price);
    println!("  status:    {}", vehicle.display_status());
    if let Some(location) = &vehicle.location {
        println!("  location:  {}", location.display());
    }
    if let Some(created) = vehicle.created_at {
        println!("  listed:    {}", created.format("%Y-%m-%d"));
    }
    Ok(())
}

pub async fn add(config: &Config, args: AddArgs) -> Result<()> {
    let client = build_client(config)?;
    let payload = VehiclePayload {
        vehicle_name: Some(args.name),
        model: args.model,
        kind: Some(args.kind),
        rent_price: Some(args.price),
        availability: None,
        image1_url: args.image1,
        image2_url: args.image2,
        location: Some(VehicleLocation::Address(args.location)),
    };
    let message = client.add_vehicle(&payload).await?;
    println!("{message}");
    Ok(())
}

pub async fn remove(config: &Config, id: &str) -> Result<()> {
    let client = build_client(config)?;
    let message = client.delete_vehicle(id).await?;
    println!("{message}");
    Ok(())
}

pub async fn set_availability(config: &Config, id: &str, available: bool) -> Result<()> {
    let client = build_client(config)?;
    let message = client
        .update_vehicle(id, &VehiclePayload::availability(available))
        .await?;
    println!("{message}");
    Ok(())
}
