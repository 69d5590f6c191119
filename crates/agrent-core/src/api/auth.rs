//! Login, signup, and the role-selection exchange.
//!
//! Login is two-step: a first call may succeed outright (token + role) or
//! signal that a role must be chosen first, returning a temporary token.
//! The outcome is a tagged enum rather than an error carrying side-channel
//! data; only genuinely failed logins surface as errors.

use anyhow::{Context, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::session::Role;

/// Result of a login attempt that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials valid and a role is already assigned.
    Authenticated { role: Role },
    /// Credentials valid but no role assigned yet; a temporary token was
    /// stored and the role-selection step must run next.
    RoleSelectionRequired { username: String },
}

/// Signup form payload for `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub fullname: String,
    pub phone: String,
    pub address: String,
}

/// Server reply to a successful registration.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupReply {
    pub message: String,
    pub temp_token: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
struct LoginSuccess {
    token: String,
    role: Role,
}

/// 403 body distinguishing "select a role first" from a failed login.
#[derive(Debug, Deserialize)]
struct RoleNeeded {
    #[serde(default)]
    role_needed: bool,
    temp_token: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct RoleGranted {
    token: String,
    role: Role,
    #[serde(default)]
    message: String,
}

impl ApiClient {
    /// Logs in with username and password.
    ///
    /// On success the final token and role are persisted. When the server
    /// answers with the role-needed marker, the temporary token and username
    /// are persisted instead and no final token is stored. Every other
    /// failure is surfaced unchanged.
    ///
    /// # Errors
    /// Returns an error on transport failure or a rejected login.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let response = self
            .request(Method::POST, "/login")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .context("Failed to reach the server")?;

        let status = response.status();
        if status.is_success() {
            let reply: LoginSuccess = response
                .json()
                .await
                .context("Failed to parse login response")?;
            self.session()
                .set_authenticated(reply.token, reply.role)?;
            return Ok(LoginOutcome::Authenticated {
                role: reply.role,
            });
        }

        let body = response.text().await.unwrap_or_default();
        if let Ok(needed) = serde_json::from_str::<RoleNeeded>(&body)
            && needed.role_needed
        {
            self.session()
                .set_pending_role(needed.temp_token, needed.username.clone())?;
            return Ok(LoginOutcome::RoleSelectionRequired {
                username: needed.username,
            });
        }

        Err(super::ApiError::from_body(status, &body).into())
    }

    /// Registers a new account.
    ///
    /// Registration always leads to role selection: the reply carries a
    /// temporary token, which is persisted alongside the username.
    ///
    /// # Errors
    /// Returns an error on transport failure or a rejected registration.
    pub async fn register(&self, registration: &Registration) -> Result<SignupReply> {
        let reply: SignupReply = self
            .send_json(
                self.request(Method::POST, "/register")
                    .json(registration),
            )
            .await?;
        self.session()
            .set_pending_role(reply.temp_token.clone(), reply.username.clone())?;
        Ok(reply)
    }

    /// Exchanges the stored temporary token for a final token and role.
    ///
    /// The temporary token travels through the same `x-access-token` header
    /// as regular credentials. On success the final token and role are
    /// persisted and the temporary token/username are cleared.
    ///
    /// # Errors
    /// Returns an error if no role exchange is pending or the server
    /// rejects it.
    pub async fn select_role(&self, role: Role) -> Result<String> {
        let session = self.session().current();
        let temp_token = session
            .temp_token
            .context("No role selection is pending. Log in first.")?;
        let username = session
            .username
            .context("No username stored for role selection. Log in first.")?;

        let reply: RoleGranted = self
            .send_json(
                self.request_with_token(
                    Method::PUT,
                    &format!("/users/{username}/role"),
                    Some(&temp_token),
                )
                .json(&serde_json::json!({ "role": role })),
            )
            .await?;

        self.session().set_authenticated(reply.token, reply.role)?;
        Ok(reply.message)
    }

    /// Logs out locally by clearing the persisted session.
    ///
    /// The server holds no session state to invalidate.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub fn logout(&self) -> Result<()> {
        self.session().clear()
    }
}
