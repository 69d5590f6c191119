//! Session persistence and change notification.
//!
//! Stores the auth token and role in `${AGRENT_HOME}/session.json` with
//! restricted permissions (0600). Tokens are never logged in full.
//!
//! Every write is published on a [`tokio::sync::watch`] channel so the UI's
//! screen gate can react to login/logout without re-reading the file on a
//! timer. Reads of a corrupt file are logged and treated as a logged-out
//! session.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::paths;

/// Marketplace role assigned to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Renter,
}

impl Role {
    /// Wire/storage representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Renter => "renter",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "owner" => Ok(Role::Owner),
            "renter" => Ok(Role::Renter),
            other => anyhow::bail!("Invalid role {other:?}. Must be \"owner\" or \"renter\"."),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted client-side session state.
///
/// `token` absent means logged out. `temp_token`/`username` are only present
/// between a "role needed" login (or a fresh signup) and the role exchange.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer credential issued by the server at login or role assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Assigned role; absent while a token is present means "role not yet chosen".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Short-lived credential for the one-shot role exchange.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_token: Option<String>,
    /// Username remembered across the role-selection step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Session {
    /// Returns true if a final token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns true if a role exchange is pending.
    pub fn role_selection_pending(&self) -> bool {
        self.temp_token.is_some()
    }
}

/// Owned handle to the persisted session.
///
/// One store is created at startup and shared (via `Arc`) with every
/// consumer; screens read snapshots, only the auth flows write.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    tx: watch::Sender<Session>,
}

impl SessionStore {
    /// Opens the store at the default session path.
    pub fn open() -> Self {
        Self::open_at(paths::session_path())
    }

    /// Opens the store at a specific path, loading any persisted session.
    ///
    /// A missing file is a logged-out session. An unreadable file is logged
    /// and also treated as logged out, so the UI falls back to the
    /// unauthenticated tree instead of failing to start.
    pub fn open_at(path: PathBuf) -> Self {
        let session = match Self::read_file(&path) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("failed to read session from {}: {err:#}", path.display());
                Session::default()
            }
        };
        let (tx, _rx) = watch::channel(session);
        Self {
            path,
            tx,
        }
    }

    fn read_file(path: &std::path::Path) -> Result<Session> {
        if !path.exists() {
            return Ok(Session::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))
    }

    /// Returns a snapshot of the current session.
    pub fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }

    /// Stores a final token and role, clearing any pending role exchange.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub fn set_authenticated(&self, token: String, role: Role) -> Result<()> {
        let mut session = self.current();
        session.token = Some(token);
        session.role = Some(role);
        session.temp_token = None;
        session.username = None;
        self.write(session)
    }

    /// Stores the temporary token and username for a pending role exchange.
    ///
    /// No final token is stored on this path.
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub fn set_pending_role(&self, temp_token: String, username: String) -> Result<()> {
        let mut session = self.current();
        session.temp_token = Some(temp_token);
        session.username = Some(username);
        self.write(session)
    }

    /// Clears the whole session (logout).
    ///
    /// # Errors
    /// Returns an error if the session cannot be persisted.
    pub fn clear(&self) -> Result<()> {
        self.write(Session::default())
    }

    /// Persists the session with restricted permissions and notifies subscribers.
    fn write(&self, session: Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(&session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        tracing::debug!(
            authenticated = session.is_authenticated(),
            pending_role = session.role_selection_pending(),
            "session updated"
        );
        self.tx.send_replace(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open_at(dir.path().join("session.json"))
    }

    #[test]
    fn missing_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.current().is_authenticated());
    }

    #[test]
    fn corrupt_file_falls_back_to_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::open_at(path);
        assert_eq!(store.current(), Session::default());
    }

    #[test]
    fn authenticated_session_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::open_at(path.clone());
        store
            .set_authenticated("tok-123".to_string(), Role::Owner)
            .unwrap();

        let reopened = SessionStore::open_at(path);
        let session = reopened.current();
        assert_eq!(session.token.as_deref(), Some("tok-123"));
        assert_eq!(session.role, Some(Role::Owner));
    }

    #[test]
    fn pending_role_keeps_final_token_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .set_pending_role("temp-tok".to_string(), "ravi".to_string())
            .unwrap();

        let session = store.current();
        assert!(session.token.is_none());
        assert_eq!(session.temp_token.as_deref(), Some("temp-tok"));
        assert_eq!(session.username.as_deref(), Some("ravi"));
    }

    #[test]
    fn role_exchange_clears_pending_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .set_pending_role("temp-tok".to_string(), "ravi".to_string())
            .unwrap();
        store
            .set_authenticated("final-tok".to_string(), Role::Renter)
            .unwrap();

        let session = store.current();
        assert_eq!(session.token.as_deref(), Some("final-tok"));
        assert!(session.temp_token.is_none());
        assert!(session.username.is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .set_authenticated("tok".to_string(), Role::Renter)
            .unwrap();
        store.clear().unwrap();

        assert_eq!(store.current(), Session::default());
    }

    #[test]
    fn writes_notify_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let mut rx = store.subscribe();

        store
            .set_authenticated("tok".to_string(), Role::Owner)
            .unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_authenticated());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_has_restricted_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::open_at(path.clone());
        store
            .set_authenticated("tok".to_string(), Role::Owner)
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
