//! Transport failures and non-success responses.

use thiserror::Error;

/// A call that did not produce a 2xx response.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// Datadog answers errors with `{"errors": [...]}`; when the body
    /// decodes that way its messages are in `errors` and joined into
    /// `message`. Otherwise `message` is the canonical status text. `body`
    /// is always the undecoded response.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: u16,
        message: String,
        errors: Vec<String>,
        body: bytes::Bytes,
    },

    #[error("Request timeout after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("Connection failed: {0}")]
    Connection(String),
}

impl ClientError {
    /// A status error carrying only a message.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
            errors: Vec::new(),
            body: bytes::Bytes::new(),
        }
    }

    /// Returns `true` for failures worth trying again: timeouts, refused
    /// connections, `429 Too Many Requests` and any 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Timeout { .. } | Self::Connection(_) => None,
        }
    }

    /// The messages of the `{"errors": [...]}` envelope, if any.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::HttpStatus { errors, .. } => errors,
            _ => &[],
        }
    }

    /// The undecoded body of a status error.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::HttpStatus { body, .. } => Some(body.as_ref()),
            _ => None,
        }
    }
}
