//! Client configuration errors.

use thiserror::Error;

use crate::operation_id::OperationIdError;

/// Errors in client or endpoint configuration.
///
/// These errors occur during client setup, or when an operation is invoked
/// that the configuration does not allow.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A required configuration field is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A `{placeholder}` in a path template was given no value.
    #[error("Missing path parameter: {name}")]
    MissingPathParam {
        /// The placeholder name.
        name: String,
    },

    /// Operation ID validation failed.
    #[error("Invalid operation ID: {0}")]
    InvalidOperationId(#[from] OperationIdError),

    /// The operation is not in the registry of unstable operations.
    #[error("Unknown unstable operation: {operation}")]
    UnknownUnstableOperation {
        /// The operation ID that was looked up.
        operation: String,
    },

    /// An unstable operation was called without being enabled.
    #[error("Unstable operation '{operation}' is disabled")]
    UnstableOperationDisabled {
        /// The operation ID that was called.
        operation: String,
    },

    /// A default header name or value is not valid HTTP.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why it was rejected.
        message: String,
    },
}

impl ConfigError {
    /// Creates a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = ConfigError::missing_field("site");
        assert_eq!(err.to_string(), "Missing required field: site");
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_unstable_operation_disabled() {
        let err = ConfigError::UnstableOperationDisabled {
            operation: "v2.ListIncidents".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unstable operation 'v2.ListIncidents' is disabled"
        );
    }
}
