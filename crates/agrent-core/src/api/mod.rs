//! HTTP client for the rental API.
//!
//! One [`ApiClient`] is the single point of outbound communication with the
//! fixed remote origin. Every request passes through [`ApiClient::request`],
//! which attaches the stored token as the `x-access-token` header when one
//! is present and sends the request unmodified otherwise.
//!
//! There is no retry, timeout, backoff, or response caching: a failed call
//! surfaces its error to the caller unchanged, and every call re-fetches.

mod auth;
mod bookings;
mod profile;
mod vehicles;

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::session::SessionStore;

pub use auth::{LoginOutcome, Registration, SignupReply};
pub use bookings::{Booking, BookingStatus, NewBooking, RenterDetails, parse_booking_time};
pub use profile::UserProfile;
pub use vehicles::{Vehicle, VehicleLocation, VehiclePayload};

/// Default API origin when neither env nor config overrides it.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Header carrying the access token (regular or temporary).
pub const AUTH_HEADER: &str = "x-access-token";

/// Error returned for non-2xx responses.
///
/// Display shows the server's `message` field when the body parses as JSON,
/// else a generic fallback, so screens can surface it to the user verbatim.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Extracts the server message from an error response body.
    fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ServerMessage>(body)
            .map(|m| m.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed (HTTP {status})"));
        Self {
            status,
            message,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// `{"message": "..."}` body the server sends on every mutation and error.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: String,
}

/// Resolves the API base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error if the resolved URL is not well-formed.
pub fn resolve_base_url(config: &Config) -> Result<String> {
    let candidate = std::env::var("AGRENT_API_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            config
                .api
                .base_url
                .as_deref()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    url::Url::parse(&candidate).with_context(|| format!("Invalid API base URL: {candidate}"))?;
    Ok(candidate.trim_end_matches('/').to_string())
}

/// Authenticated API client.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Creates a client for the configured base URL.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        Ok(Self {
            base_url: resolve_base_url(config)?,
            http: reqwest::Client::new(),
            session,
        })
    }

    /// Returns the session store this client reads tokens from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Builds a request with the stored token attached (when present).
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let token = self.session.current().token;
        self.request_with_token(method, path, token.as_deref())
    }

    /// The chokepoint every outgoing request goes through.
    ///
    /// `token` is attached as `x-access-token` when present; the role
    /// exchange passes the temporary token through here.
    fn request_with_token(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%method, path, authenticated = token.is_some(), "api request");
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.header(AUTH_HEADER, token),
            None => builder,
        }
    }

    /// Sends a request and deserializes a 2xx JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = builder.send().await.context("Failed to reach the server")?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .context("Failed to parse server response")
    }

    /// Sends a request and returns the server's confirmation message.
    async fn send_message(&self, builder: reqwest::RequestBuilder) -> Result<String> {
        let message: ServerMessage = self.send_json(builder).await?;
        Ok(message.message)
    }
}

/// Converts non-2xx responses into [`ApiError`] without wrapping context, so
/// `Display` on the returned error is the server message itself.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_body(status, &body).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_server_message() {
        let err = ApiError::from_body(StatusCode::UNAUTHORIZED, r#"{"message": "Invalid password!"}"#);
        assert_eq!(err.to_string(), "Invalid password!");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn api_error_falls_back_on_unparseable_body() {
        let err = ApiError::from_body(StatusCode::BAD_GATEWAY, "<html>nope</html>");
        assert_eq!(err.to_string(), "Request failed (HTTP 502 Bad Gateway)");
    }

    #[test]
    fn base_url_default_and_trailing_slash() {
        let config = Config::default();
        // Note: relies on AGRENT_API_URL being unset in the test environment.
        if std::env::var_os("AGRENT_API_URL").is_none() {
            assert_eq!(resolve_base_url(&config).unwrap(), DEFAULT_BASE_URL);
        }

        let mut config = Config::default();
        config.api.base_url = Some("http://10.0.0.2:5000/".to_string());
        assert_eq!(resolve_base_url(&config).unwrap(), "http://10.0.0.2:5000");
    }

    #[test]
    fn base_url_rejects_garbage() {
        let mut config = Config::default();
        config.api.base_url = Some("not a url".to_string());
        assert!(resolve_base_url(&config).is_err());
    }
}
