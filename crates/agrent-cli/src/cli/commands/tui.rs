//! Interactive UI launch.

use agrent_core::config::Config;
use anyhow::Result;

use super::build_client;

pub async fn run(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    agrent_tui::run(client).await
}
