//! Registration page

use super::Modal;
use crate::api::Backend;
use crate::error::ApiError;
use crate::routes::Route;
use crate::types::RegisterRequest;
use tracing::{error, info};

pub const VALIDATION_MESSAGE: &str = "Please fill in all fields to complete registration.";
pub const SUCCESS_MESSAGE: &str = "Registered successfully! You can now log in.";
pub const FAILURE_FALLBACK: &str = "Registration failed due to a server issue or existing user.";
pub const CONNECTION_MESSAGE: &str =
    "An error occurred while connecting to the server. Please try again.";

/// Registration form fields as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// Required-field check; no other validation happens client-side.
    pub fn validate(&self) -> Result<RegisterRequest, ApiError> {
        let fields = [&self.firstname, &self.lastname, &self.email, &self.password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ApiError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        Ok(RegisterRequest {
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    /// Show the modal, then navigate to `redirect`
    Registered { modal: Modal, redirect: Route },
    /// Show the modal and stay on the page
    Rejected(Modal),
}

impl RegisterOutcome {
    pub fn modal(&self) -> &Modal {
        match self {
            RegisterOutcome::Registered { modal, .. } | RegisterOutcome::Rejected(modal) => modal,
        }
    }
}

/// Validate and submit. An invalid form never reaches the backend.
pub async fn submit_registration<B>(backend: &B, form: &RegisterForm) -> RegisterOutcome
where
    B: Backend + ?Sized,
{
    let request = match form.validate() {
        Ok(request) => request,
        Err(e) => {
            return RegisterOutcome::Rejected(Modal::error(
                "Validation Error",
                e.message_or(VALIDATION_MESSAGE),
            ));
        }
    };

    match backend.register(&request).await {
        Ok(_) => {
            info!(email = %request.email, "Registered");
            RegisterOutcome::Registered {
                modal: Modal::success("Success", SUCCESS_MESSAGE),
                redirect: Route::Login,
            }
        }
        Err(e @ ApiError::Connectivity(_)) => {
            error!(error = %e, "Registration request failed");
            RegisterOutcome::Rejected(Modal::error("Connection Error", CONNECTION_MESSAGE))
        }
        Err(e) => RegisterOutcome::Rejected(Modal::error(
            "Registration Failed",
            e.message_or(FAILURE_FALLBACK),
        )),
    }
}
