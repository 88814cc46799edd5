//! Response format trait and implementations.
//!
//! The [`ResponseFormat`] trait defines how to parse HTTP responses into
//! typed values.

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Trait for response format parsing strategies.
///
/// Each format implements its own parsing logic, transforming an HTTP
/// response body into a typed output value.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::model::Decoded;
/// use api::response::{ResponseFormat, JsonFormat};
///
/// // The format type encodes both the parsing strategy and output type
/// type ArchivesResponse = JsonFormat<Decoded<LogsArchives>>;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after parsing.
    type Output: Send + Sync;

    /// Parse a response body into the output type.
    fn parse(
        body: bytes::Bytes,
    ) -> impl Future<Output = Result<Self::Output, ValidationError>> + Send;

    /// Returns the value sent in the `Accept` header.
    fn content_type() -> &'static str;
}

/// JSON response format with typed deserialization.
///
/// ## Type Parameters
///
/// - `T`: The type to deserialize the JSON into. Must implement [`DeserializeOwned`].
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::EmptyBody);
        }
        serde_json::from_slice(&body).map_err(ValidationError::JsonParse)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

/// Format for operations that answer with no content (e.g. `204`).
///
/// Any body the server does send is discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFormat;

impl ResponseFormat for EmptyFormat {
    type Output = ();

    async fn parse(_body: bytes::Bytes) -> Result<Self::Output, ValidationError> {
        Ok(())
    }

    fn content_type() -> &'static str {
        "*/*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Warning {
        code: String,
    }

    #[tokio::test]
    async fn test_json_format_parses() {
        let body = bytes::Bytes::from_static(br#"{"code":"unknown_index"}"#);
        let parsed = JsonFormat::<Warning>::parse(body).await.unwrap();
        assert_eq!(parsed.code, "unknown_index");
        assert_eq!(JsonFormat::<Warning>::content_type(), "application/json");
    }

    #[tokio::test]
    async fn test_json_format_empty_body() {
        let err = JsonFormat::<Warning>::parse(bytes::Bytes::from_static(b"  \n"))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::EmptyBody));
    }

    #[tokio::test]
    async fn test_json_format_invalid() {
        let err = JsonFormat::<Warning>::parse(bytes::Bytes::from_static(b"nope"))
            .await
            .unwrap_err();
        assert!(err.is_parse_error());
    }

    #[tokio::test]
    async fn test_empty_format_ignores_body() {
        EmptyFormat::parse(bytes::Bytes::from_static(b"ignored"))
            .await
            .unwrap();
    }
}
