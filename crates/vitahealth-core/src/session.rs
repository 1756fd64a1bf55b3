//! Session state holder
//!
//! The session is a plain value recomputed from persisted storage. Hosts keep
//! the current value at their root and replace it after login, logout or a
//! storage change; a changed value is the invalidation signal.

use crate::error::StorageError;
use crate::storage::{
    KeyValueStore, LEGACY_EMAIL_KEY, LEGACY_FIRSTNAME_KEY, TOKEN_KEY, USER_KEY,
};
use crate::types::{AuthResponse, UserSummary};
use tracing::{debug, warn};

/// Authentication state as derived from storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserSummary>,
}

impl Session {
    /// A session with no credential
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// True when a token is held. Freshness is never checked client-side.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, if authenticated
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The stored user summary, if any
    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    /// Label for the user menu
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|u| u.firstname.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("User")
    }
}

/// Reads and writes the persisted credential
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Wrap a key-value store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Re-read the persisted token and user record.
    ///
    /// A user record that does not parse yields an anonymous session.
    pub fn sync_from_storage(&self) -> Session {
        let Some(token) = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
            return Session::anonymous();
        };

        let user = match self.store.get(USER_KEY) {
            None => None,
            Some(raw) => match serde_json::from_str::<UserSummary>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Malformed persisted user record, treating session as anonymous");
                    return Session::anonymous();
                }
            },
        };

        Session {
            token: Some(token),
            user,
        }
    }

    /// Re-read storage and return the session only if it differs from
    /// `current`. Storage changes unrelated to credentials (plan progress)
    /// yield `None`, so holders do not republish an identical session.
    pub fn resync(&self, current: &Session) -> Option<Session> {
        let fresh = self.sync_from_storage();
        (fresh != *current).then_some(fresh)
    }

    /// Persist a successful login and announce the change.
    pub fn persist_login(&self, auth: &AuthResponse) -> Result<Session, StorageError> {
        self.store.set(TOKEN_KEY, &auth.token)?;
        match &auth.user {
            Some(user) => self.store.set(USER_KEY, &serde_json::to_string(user)?)?,
            None => self.store.remove(USER_KEY)?,
        }
        self.store.notify_changed();
        debug!("Session persisted");

        Ok(self.sync_from_storage())
    }

    /// Remove every credential key and announce the change.
    pub fn clear(&self) -> Result<Session, StorageError> {
        for key in [TOKEN_KEY, USER_KEY, LEGACY_FIRSTNAME_KEY, LEGACY_EMAIL_KEY] {
            self.store.remove(key)?;
        }
        self.store.notify_changed();
        debug!("Session cleared");

        Ok(Session::anonymous())
    }
}
