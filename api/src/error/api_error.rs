//! Top-level API error type.

use super::{AuthError, ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Top-level error type for all API operations.
///
/// This enum aggregates all error categories, enabling unified error handling
/// while preserving the ability to match on specific error types when needed.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::error::ApiError;
///
/// fn handle_error(err: ApiError) {
///     match err {
///         ApiError::Client(e) => eprintln!("Network error: {e}"),
///         ApiError::Validation(e) => eprintln!("Invalid payload: {e}"),
///         ApiError::Auth(e) => eprintln!("Auth failed: {e}"),
///         ApiError::Config(e) => eprintln!("Configuration error: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client errors (network, timeout, non-2xx responses).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Payload errors (parse failures, missing required fields).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication and authorization errors.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Client configuration errors, including disabled unstable operations.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the HTTP status code the server answered with, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            Self::Auth(AuthError::AuthenticationFailed { .. }) => Some(401),
            Self::Auth(AuthError::InsufficientPermissions { .. }) => Some(403),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let client_err = ClientError::Timeout { duration_ms: 5000 };
        let api_err: ApiError = client_err.into();
        assert!(matches!(api_err, ApiError::Client(_)));
    }

    #[test]
    fn test_from_config_error() {
        let api_err: ApiError = ConfigError::UnstableOperationDisabled {
            operation: "v2.ListEvents".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::Config(_)));
        assert_eq!(api_err.status_code(), None);
    }

    #[test]
    fn test_error_display_is_transparent() {
        let err = ApiError::Validation(ValidationError::MissingRequiredField { field: "name" });
        assert_eq!(err.to_string(), "required field name missing");
    }

    #[test]
    fn test_status_code() {
        let err: ApiError = ClientError::http_status(404, "Not Found").into();
        assert_eq!(err.status_code(), Some(404));

        let err: ApiError = AuthError::AuthenticationFailed {
            message: "bad key".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), Some(401));
    }
}
