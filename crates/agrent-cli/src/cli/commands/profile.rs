//! Profile command.

use agrent_core::config::Config;
use anyhow::Result;

use super::build_client;

pub async fn show(config: &Config) -> Result<()> {
    let client = build_client(config)?;

    // Profile and counts are independent; fetch them together.
    let (profile, vehicles, bookings) = tokio::join!(
        client.get_profile(),
        client.list_vehicles(),
        client.list_bookings()
    );
    let profile = profile?;
    let vehicles = vehicles?;
    let bookings = bookings?;

    let name = if profile.fullname.is_empty() {
        profile.username.clone()
    } else {
        profile.fullname.clone()
    };
    println!("{name}");
    println!("  username:  {}", profile.username);
    println!(
        "  role:      {}",
        profile.role.map_or("not set", |role| role.as_str())
    );
    println!("  phone:     {}", profile.phone);
    println!("  address:   {}", profile.address);
    if let Some(created) = profile.created_at {
        println!("  since:     {}", created.format("%Y-%m-%d"));
    }
    println!("  vehicles:  {}", vehicles.len());
    println!("  bookings:  {}", bookings.len());
    Ok(())
}
