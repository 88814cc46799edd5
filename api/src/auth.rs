//! Authentication methods.

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};

use crate::error::AuthError;

/// How a credential is attached to outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiAuthMethod {
    /// Sent in the named header, e.g. `DD-API-KEY`.
    ApiKey(String),
    /// Sent as `Authorization: Bearer <token>`.
    BearerToken,
}

impl ApiAuthMethod {
    /// Resolves the header name and value for `secret`.
    ///
    /// The value is marked sensitive so it is never printed by `Debug`.
    pub(crate) fn header(&self, secret: &str) -> Result<(HeaderName, HeaderValue), AuthError> {
        let (name, raw) = match self {
            Self::ApiKey(header) => (
                HeaderName::try_from(header.as_str()).map_err(|_| AuthError::InvalidKeyFormat)?,
                secret.to_string(),
            ),
            Self::BearerToken => (AUTHORIZATION, format!("Bearer {secret}")),
        };

        let mut value = HeaderValue::try_from(raw).map_err(|_| AuthError::InvalidKeyFormat)?;
        value.set_sensitive(true);
        Ok((name, value))
    }
}
