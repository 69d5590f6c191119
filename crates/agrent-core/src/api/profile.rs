//! Profile fetch.

use anyhow::Result;
use chrono::NaiveDateTime;
use reqwest::Method;
use serde::Deserialize;

use super::ApiClient;
use crate::session::Role;

/// The authenticated user's account record.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl ApiClient {
    /// Fetches the authenticated user's profile.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.send_json(self.request(Method::GET, "/profile")).await
    }
}
