//! Session persistence.
//!
//! A session is two entries in an origin-scoped key-value store: the raw
//! bearer token under [`keys::TOKEN`] and the JSON user profile under
//! [`keys::USER`]. Nothing here checks expiry; the backend decides token
//! validity by answering 401.

mod storage;

pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::path::PathBuf;
use std::sync::Arc;

use leadscout_core::User;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Storage keys.
pub mod keys {
    /// Raw bearer token.
    pub const TOKEN: &str = "token";
    /// JSON-encoded [`leadscout_core::User`].
    pub const USER: &str = "user";
}

/// Errors from the session backend.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// An authenticated session.
#[derive(Clone)]
pub struct Session {
    pub token: SecretString,
    pub user: User,
}

impl Session {
    /// Create a session from a raw token and profile.
    #[must_use]
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: SecretString::from(token.into()),
            user,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Load/save/clear over a [`KeyValueStore`].
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Wrap an arbitrary backend.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Store persisted in a JSON file.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileStore::new(path))
    }

    /// Store that lives only as long as this value and its clones.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// The stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be read.
    pub fn token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self
            .backend
            .get(keys::TOKEN)?
            .filter(|t| !t.is_empty())
            .map(SecretString::from))
    }

    /// Read the current session.
    ///
    /// Both entries must be present and the user blob must decode; anything
    /// else counts as signed out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be read.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let Some(user) = self.stored_user()? else {
            return Ok(None);
        };
        Ok(Some(Session { token, user }))
    }

    /// Persist a session, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be written.
    #[instrument(skip(self, session), fields(user_id = %session.user.id))]
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        self.backend
            .set(keys::TOKEN, session.token.expose_secret())?;
        self.write_user(&session.user)?;
        debug!("Session saved");
        Ok(())
    }

    /// Remove both entries.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be written.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), SessionError> {
        self.backend.remove(keys::TOKEN)?;
        self.backend.remove(keys::USER)?;
        debug!("Session cleared");
        Ok(())
    }

    /// Read-modify-write the stored user.
    ///
    /// Returns the updated user, or `None` when no user is stored.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be read or written.
    pub fn update_user(&self, f: impl FnOnce(&mut User)) -> Result<Option<User>, SessionError> {
        let Some(mut user) = self.stored_user()? else {
            return Ok(None);
        };
        f(&mut user);
        self.write_user(&user)?;
        Ok(Some(user))
    }

    /// Set the stored balance.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the backend cannot be read or written.
    pub fn set_balance(&self, balance: i64) -> Result<Option<User>, SessionError> {
        self.update_user(|user| user.balance = balance)
    }

    fn stored_user(&self) -> Result<Option<User>, SessionError> {
        let Some(raw) = self.backend.get(keys::USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Stored user profile is malformed; treating as signed out");
                Ok(None)
            }
        }
    }

    fn write_user(&self, user: &User) -> Result<(), SessionError> {
        let json = serde_json::to_string(user)?;
        self.backend.set(keys::USER, &json)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use leadscout_core::{Theme, UserId};

    fn sample_user() -> User {
        User {
            id: UserId::new(7),
            username: "mehmet".to_owned(),
            email: "mehmet@example.com".to_owned(),
            balance: 40,
            is_admin: false,
            theme: Theme::Dark,
        }
    }

    #[test]
    fn test_empty_store_has_no_session() {
        let store = SessionStore::in_memory();
        assert!(store.load().unwrap().is_none());
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips_user() {
        let store = SessionStore::in_memory();
        store.save(&Session::new("tok-1", sample_user())).unwrap();

        let session = store.load().unwrap().unwrap();
        assert_eq!(session.token.expose_secret(), "tok-1");
        assert_eq!(session.user, sample_user());
    }

    #[test]
    fn test_clear_removes_both_entries() {
        let store = SessionStore::in_memory();
        store.save(&Session::new("tok-1", sample_user())).unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_token_without_user_is_not_a_session() {
        let backend = MemoryStore::new();
        backend.set(keys::TOKEN, "orphan").unwrap();
        let store = SessionStore::new(backend);

        assert!(store.token().unwrap().is_some());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_malformed_user_blob_is_signed_out() {
        let backend = MemoryStore::new();
        backend.set(keys::TOKEN, "tok").unwrap();
        backend.set(keys::USER, "{\"id\": ").unwrap();
        let store = SessionStore::new(backend);

        assert!(store.load().unwrap().is_none());
        assert!(store.set_balance(5).unwrap().is_none());
    }

    #[test]
    fn test_update_user_persists_change() {
        let store = SessionStore::in_memory();
        store.save(&Session::new("tok", sample_user())).unwrap();

        let updated = store
            .update_user(|u| u.theme = u.theme.toggled())
            .unwrap()
            .unwrap();
        assert_eq!(updated.theme, Theme::Light);
        assert_eq!(store.load().unwrap().unwrap().user.theme, Theme::Light);

        store.set_balance(99).unwrap();
        assert_eq!(store.load().unwrap().unwrap().user.balance, 99);
    }

    #[test]
    fn test_file_store_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        SessionStore::file(&path)
            .save(&Session::new("tok-file", sample_user()))
            .unwrap();

        let session = SessionStore::file(&path).load().unwrap().unwrap();
        assert_eq!(session.token.expose_secret(), "tok-file");
        assert_eq!(session.user.username, "mehmet");
    }

    #[test]
    fn test_clear_recovers_from_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"token": "abc", trunc"#).unwrap();

        let store = SessionStore::file(&path);
        assert!(matches!(store.load(), Err(SessionError::Corrupt { .. })));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        store.save(&Session::new("tok-new", sample_user())).unwrap();
        assert_eq!(store.load().unwrap().unwrap().user, sample_user());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("super-secret", sample_user());
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
