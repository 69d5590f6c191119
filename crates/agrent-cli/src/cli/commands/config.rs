//! Config commands.

use agrent_core::config::{Config, paths};
use anyhow::Result;

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    Config::init()?;
    println!("Wrote {}", paths::config_path().display());
    Ok(())
}
