//! Error types for vitahealth-core.

use thiserror::Error;

/// Result of a single call to the external backend.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure categories of a backend call.
///
/// Pages match on the category instead of re-implementing their own
/// try/catch around every request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Required input was missing; no request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Backend {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the response body, if any.
        message: Option<String>,
    },

    /// The backend rejected the credential (HTTP 401).
    #[error("Session expired")]
    Unauthorized,

    /// The request never produced a response.
    #[error("Cannot reach backend: {0}")]
    Connectivity(String),

    /// A success response whose body did not have the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The backend's own message when it sent one, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ApiError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Maps a non-2xx status and optional body message to a category.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        if status == 401 {
            ApiError::Unauthorized
        } else {
            ApiError::Backend { status, message }
        }
    }

    /// True for connectivity failures.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity(_))
    }
}

/// Errors raised by a [`KeyValueStore`](crate::KeyValueStore) implementation.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying medium failed (file system, browser quota).
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// A value could not be serialized for writing.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_is_surfaced_verbatim() {
        let err = ApiError::Backend {
            status: 409,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.message_or("fallback"), "Email already registered");
    }

    #[test]
    fn test_missing_message_uses_fallback() {
        let err = ApiError::Backend {
            status: 500,
            message: None,
        };
        assert_eq!(err.message_or("Prediction failed"), "Prediction failed");

        let err = ApiError::Connectivity("refused".to_string());
        assert_eq!(err.message_or("offline"), "offline");
    }

    #[test]
    fn test_from_status_maps_401() {
        assert_eq!(ApiError::from_status(401, None), ApiError::Unauthorized);
        assert!(matches!(
            ApiError::from_status(404, None),
            ApiError::Backend { status: 404, .. }
        ));
    }
}
