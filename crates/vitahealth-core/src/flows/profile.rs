//! Profile page

use crate::api::Backend;
use crate::error::{ApiError, ApiResult};
use crate::planner_key::profile_planner_key;
use crate::routes::Route;
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;
use crate::types::{HistoryRecord, Profile, RecordId};
use tracing::{error, warn};

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const DELETE_CONFIRMATION: &str = "Delete this record?";

/// Profile page state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePage {
    pub profile: Option<Profile>,
    pub history: Vec<HistoryRecord>,
}

impl ProfilePage {
    /// Drop a record from the rendered list
    pub fn remove_record(&mut self, id: &RecordId) {
        self.history.retain(|h| &h.id != id);
    }

    /// Planner route behind an entry's "View Planner" link
    pub fn planner_route(record: &HistoryRecord) -> Route {
        Route::Planner {
            vitamin: profile_planner_key(&record.deficiency),
        }
    }
}

/// Outcome of the profile fetch
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileFetch {
    Loaded(Profile),
    /// Alert with the message, then navigate to login
    Expired { alert: String, redirect: Route },
    /// Any other failure; the page keeps its empty fields
    Unavailable,
}

fn expired() -> ProfileFetch {
    ProfileFetch::Expired {
        alert: SESSION_EXPIRED_MESSAGE.to_string(),
        redirect: Route::Login,
    }
}

/// Token required by the page; its absence means alert-and-redirect.
pub fn require_token(session: &Session) -> Result<&str, ProfileFetch> {
    session.token().ok_or_else(expired)
}

/// Fetch profile fields. A 401 destroys the persisted session.
pub async fn fetch_profile<B, S>(backend: &B, sessions: &SessionStore<S>, token: &str) -> ProfileFetch
where
    B: Backend + ?Sized,
    S: KeyValueStore,
{
    match backend.profile(token).await {
        Ok(profile) => ProfileFetch::Loaded(profile),
        Err(ApiError::Unauthorized) => {
            if let Err(e) = sessions.clear() {
                error!(error = %e, "Failed to clear expired session");
            }
            expired()
        }
        Err(e) => {
            error!(error = %e, "Error loading profile");
            ProfileFetch::Unavailable
        }
    }
}

/// Fetch history; any failure renders as an empty list.
pub async fn fetch_history<B>(backend: &B, token: &str) -> Vec<HistoryRecord>
where
    B: Backend + ?Sized,
{
    match backend.history(token).await {
        Ok(payload) => payload.into_records(),
        Err(e) => {
            error!(error = %e, "Error loading history");
            Vec::new()
        }
    }
}

/// Load the whole page. Returns `Err` with the redirect when the session is
/// missing or expired.
pub async fn load_profile<B, S>(
    backend: &B,
    sessions: &SessionStore<S>,
    session: &Session,
) -> Result<ProfilePage, ProfileFetch>
where
    B: Backend + ?Sized,
    S: KeyValueStore,
{
    let token = require_token(session)?;

    let profile = match fetch_profile(backend, sessions, token).await {
        ProfileFetch::Loaded(profile) => Some(profile),
        expired @ ProfileFetch::Expired { .. } => return Err(expired),
        ProfileFetch::Unavailable => None,
    };
    let history = fetch_history(backend, token).await;

    Ok(ProfilePage { profile, history })
}

/// Delete a history record.
///
/// The record leaves the rendered list before the call completes and is not
/// restored when the call fails; the failure is returned for logging only.
pub async fn delete_record<B>(
    page: &mut ProfilePage,
    backend: &B,
    token: &str,
    id: &RecordId,
) -> ApiResult<()>
where
    B: Backend + ?Sized,
{
    page.remove_record(id);
    let result = backend.delete_history(token, id).await;
    if let Err(e) = &result {
        warn!(%id, error = %e, "History delete failed, local list not restored");
    }
    result
}
