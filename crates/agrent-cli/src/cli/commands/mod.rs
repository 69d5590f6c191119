//! CLI command implementations.

pub mod auth;
pub mod bookings;
pub mod config;
pub mod profile;
pub mod tui;
pub mod vehicles;

use std::sync::Arc;

use agrent_core::api::ApiClient;
use agrent_core::config::Config;
use agrent_core::session::SessionStore;
use anyhow::Result;

/// Builds the API client over the default session store.
pub(crate) fn build_client(config: &Config) -> Result<Arc<ApiClient>> {
    let store = Arc::new(SessionStore::open());
    Ok(Arc::new(ApiClient::new(config, store)?))
}
