//! Per-call request inputs.

use std::fmt::Display;

use serde::Serialize;

use crate::error::ValidationError;

/// The variable parts of a single call: path parameters, query string and
/// JSON body.
///
/// ## Examples
///
/// ```rust,ignore
/// let parts = RequestParts::new()
///     .path_param("incident_id", "abc-123")
///     .query_csv("include", ["users", "attachments"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    pub(crate) path_params: Vec<(&'static str, String)>,
    pub(crate) query: Vec<(&'static str, String)>,
    pub(crate) body: Option<bytes::Bytes>,
}

impl RequestParts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value substituted for `{name}` in the path template.
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    /// Appends a query parameter.
    pub fn query(mut self, name: &'static str, value: impl Display) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// Appends a query parameter if a value is given.
    pub fn query_opt(self, name: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Appends a comma-separated query parameter. Empty lists are skipped.
    pub fn query_csv<I>(self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let joined = values
            .into_iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        if joined.is_empty() {
            self
        } else {
            self.query(name, joined)
        }
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::JsonEncode`] if serialization fails.
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ValidationError> {
        let encoded = serde_json::to_vec(body).map_err(ValidationError::JsonEncode)?;
        self.body = Some(encoded.into());
        Ok(self)
    }

    /// Returns the query parameters in insertion order.
    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }
}
