//! Login page

use super::Modal;
use crate::api::Backend;
use crate::error::ApiError;
use crate::routes::Route;
use crate::session::{Session, SessionStore};
use crate::storage::KeyValueStore;
use crate::types::LoginRequest;
use tracing::{error, info};

pub const VALIDATION_MESSAGE: &str = "Please enter both your email and password.";
pub const FAILURE_FALLBACK: &str = "Login failed. Please check your credentials.";
pub const CONNECTION_MESSAGE: &str =
    "An error occurred while connecting to the server. Please try again.";

/// Where a fresh session lands
pub const LANDING_ROUTE: Route = Route::Detect;

/// Login form fields as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Credentials persisted; replace the root session with `session`
    LoggedIn { session: Session, redirect: Route },
    Rejected(Modal),
}

/// Validate, submit and persist the issued credential.
pub async fn submit_login<B, S>(
    backend: &B,
    sessions: &SessionStore<S>,
    form: &LoginForm,
) -> LoginOutcome
where
    B: Backend + ?Sized,
    S: KeyValueStore,
{
    if form.email.trim().is_empty() || form.password.is_empty() {
        return LoginOutcome::Rejected(Modal::error("Validation Error", VALIDATION_MESSAGE));
    }

    let request = LoginRequest {
        email: form.email.trim().to_string(),
        password: form.password.clone(),
    };

    let auth = match backend.login(&request).await {
        Ok(auth) => auth,
        Err(e @ ApiError::Connectivity(_)) => {
            error!(error = %e, "Login request failed");
            return LoginOutcome::Rejected(Modal::error("Connection Error", CONNECTION_MESSAGE));
        }
        Err(e) => {
            return LoginOutcome::Rejected(Modal::error(
                "Login Failed",
                e.message_or(FAILURE_FALLBACK),
            ));
        }
    };

    match sessions.persist_login(&auth) {
        Ok(session) => {
            info!(email = %request.email, "Logged in");
            LoginOutcome::LoggedIn {
                session,
                redirect: LANDING_ROUTE,
            }
        }
        Err(e) => {
            error!(error = %e, "Failed to persist session");
            LoginOutcome::Rejected(Modal::error("Login Failed", e.to_string()))
        }
    }
}
