//! Authentication and authorization errors.

use thiserror::Error;

/// Errors related to API authentication.
///
/// These errors occur during credential setup or when the server
/// rejects the API/application key pair.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A key required by the caller is not configured.
    #[error("Missing API key: {key}")]
    MissingApiKey {
        /// The environment variable or header the key is read from.
        key: String,
    },

    /// A key cannot be sent as an HTTP header value.
    #[error("Invalid API key format")]
    InvalidKeyFormat,

    /// Server rejected the credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Error message from the server.
        message: String,
    },

    /// Credentials are valid but lack access to the operation (HTTP 403).
    #[error("Insufficient permissions for {operation}: {message}")]
    InsufficientPermissions {
        /// The operation that was denied.
        operation: String,
        /// Error message from the server.
        message: String,
    },
}

impl AuthError {
    /// Returns `true` if the error was reported by the server rather than
    /// detected locally.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed { .. } | Self::InsufficientPermissions { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_display() {
        let err = AuthError::MissingApiKey {
            key: "DD_API_KEY".to_string(),
        };
        assert_eq!(err.to_string(), "Missing API key: DD_API_KEY");
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_insufficient_permissions() {
        let err = AuthError::InsufficientPermissions {
            operation: "v2.DeleteIncident".to_string(),
            message: "Forbidden".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient permissions for v2.DeleteIncident: Forbidden"
        );
        assert!(err.is_rejection());
    }
}
