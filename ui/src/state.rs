//! Global application state

use crate::api::GlooBackend;
use crate::storage::LocalStore;
use leptos::prelude::*;
use tracing::error;
use vitahealth_core::{ProgressStore, Session, SessionStore, DEFAULT_ORIGIN};

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// Session as last read from local storage
    pub session: RwSignal<Session>,
    /// Bumped on every storage change; views holding derived data re-read
    pub storage_version: RwSignal<u64>,
    /// Backend client
    pub backend: GlooBackend,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(SessionStore::new(LocalStore).sync_from_storage()),
            storage_version: RwSignal::new(0),
            backend: GlooBackend::new(DEFAULT_ORIGIN),
        }
    }

    pub fn sessions(&self) -> SessionStore<LocalStore> {
        SessionStore::new(LocalStore)
    }

    pub fn progress(&self) -> ProgressStore<LocalStore> {
        ProgressStore::new(LocalStore)
    }

    /// Re-read everything after a `storage` event.
    ///
    /// The session signal only fires when the credentials actually changed;
    /// progress writes just bump `storage_version`.
    pub fn resync(&self) {
        let changed = self.session.with_untracked(|current| self.sessions().resync(current));
        if let Some(session) = changed {
            self.session.set(session);
        }
        self.storage_version.update(|v| *v += 1);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn logout(&self) {
        match self.sessions().clear() {
            Ok(session) => self.session.set(session),
            Err(e) => error!(error = %e, "Failed to clear session"),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
