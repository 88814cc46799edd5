//! Endpoint definition with type-state builder pattern.
//!
//! The [`Endpoint`] struct represents a single REST operation with its
//! operation ID, method, path template, and response format. The
//! [`EndpointBuilder`] uses a type-state pattern to ensure all required
//! fields are set at compile time.

use std::marker::PhantomData;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::ConfigError;
use crate::method::RestMethod;
use crate::response::ResponseFormat;

/// Characters escaped when a value is substituted into a path segment.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Marker traits for builder state tracking.
pub mod builder_state {
    /// Marker for a field that has not been set.
    pub struct Missing;
    /// Marker for a field that has been set.
    pub struct Present;
}

use builder_state::{Missing, Present};

/// A REST API operation definition.
///
/// Endpoints are parameterized by their response format, enabling type-safe
/// response handling at compile time.
///
/// ## Type Parameters
///
/// - `F`: The [`ResponseFormat`] implementation for this endpoint's response.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::{Endpoint, RestMethod};
/// use api::model::Decoded;
/// use api::response::JsonFormat;
///
/// let endpoint: Endpoint<JsonFormat<Decoded<IncidentResponse>>> = Endpoint::builder()
///     .id("v2.GetIncident")
///     .method(RestMethod::Get)
///     .path("/api/v2/incidents/{incident_id}")
///     .unstable()
///     .build();
/// ```
#[derive(Debug)]
pub struct Endpoint<F: ResponseFormat> {
    /// Operation identifier, e.g. `v2.ListEvents`.
    id: String,
    /// HTTP method for this endpoint.
    method: RestMethod,
    /// URL path template (may contain `{param}` placeholders).
    path: String,
    /// Optional description of what this endpoint does.
    description: Option<String>,
    /// Whether the operation must be explicitly enabled before use.
    unstable: bool,
    /// Phantom data for the response format type.
    _format: PhantomData<F>,
}

// Manual Clone implementation - PhantomData<F> is always Clone
impl<F: ResponseFormat> Clone for Endpoint<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            method: self.method,
            path: self.path.clone(),
            description: self.description.clone(),
            unstable: self.unstable,
            _format: PhantomData,
        }
    }
}

impl<F: ResponseFormat> Endpoint<F> {
    /// Creates a new endpoint builder.
    pub fn builder() -> EndpointBuilder<Missing, Missing, Missing, F> {
        EndpointBuilder::new()
    }

    /// Returns the operation identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the HTTP method for this endpoint.
    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Returns the path template for this endpoint.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the optional description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `true` if the operation is gated behind the unstable registry.
    pub fn is_unstable(&self) -> bool {
        self.unstable
    }

    /// Builds the request URL from a base URL and path parameter values.
    ///
    /// Every `{name}` placeholder must have a matching entry in `params`;
    /// values are percent-encoded as a single path segment.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingPathParam`] when a placeholder has no value,
    /// or [`ConfigError::InvalidUrl`] if the result does not parse.
    pub fn full_url(
        &self,
        base_url: &Url,
        params: &[(&'static str, String)],
    ) -> Result<Url, ConfigError> {
        let path = self.substitute_params(params)?;
        Ok(base_url.join(&path)?)
    }

    /// Substitutes path parameters in the template.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let path = endpoint.substitute_params(&[("archive_id", "a/b".to_string())])?;
    /// // "/api/v2/logs/config/archives/{archive_id}" becomes ".../archives/a%2Fb"
    /// ```
    pub fn substitute_params(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<String, ConfigError> {
        let mut path = self.path.clone();
        for name in self.path_params() {
            let (_, value) = params
                .iter()
                .find(|(key, _)| *key == name)
                .ok_or_else(|| ConfigError::MissingPathParam {
                    name: name.to_string(),
                })?;
            let encoded = utf8_percent_encode(value, PATH_SEGMENT_ENCODE_SET).to_string();
            path = path.replace(&format!("{{{name}}}"), &encoded);
        }
        Ok(path)
    }

    /// Extracts path parameter names from the template.
    ///
    /// Returns parameter names in the order they appear in the path.
    pub fn path_params(&self) -> Vec<&str> {
        let mut params = Vec::new();
        let mut rest = self.path.as_str();

        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            if end > 0 {
                params.push(&after[..end]);
            }
            rest = &after[end + 1..];
        }

        params
    }
}

/// Type-state builder for [`Endpoint`].
///
/// The builder uses phantom type parameters to track which required fields
/// have been set, preventing construction until all required fields are present.
///
/// ## Type Parameters
///
/// - `Id`: State of the ID field (`Missing` or `Present`).
/// - `Method`: State of the method field (`Missing` or `Present`).
/// - `Path`: State of the path field (`Missing` or `Present`).
/// - `F`: The response format type.
pub struct EndpointBuilder<Id, Method, Path, F: ResponseFormat> {
    id: Option<String>,
    method: Option<RestMethod>,
    path: Option<String>,
    description: Option<String>,
    unstable: bool,
    _phantom: PhantomData<(Id, Method, Path, F)>,
}

impl<F: ResponseFormat> EndpointBuilder<Missing, Missing, Missing, F> {
    /// Creates a new endpoint builder with no fields set.
    pub fn new() -> Self {
        Self {
            id: None,
            method: None,
            path: None,
            description: None,
            unstable: false,
            _phantom: PhantomData,
        }
    }
}

impl<F: ResponseFormat> Default for EndpointBuilder<Missing, Missing, Missing, F> {
    fn default() -> Self {
        Self::new()
    }
}

// ID setter - transitions Id from Missing to Present
impl<M, P, F: ResponseFormat> EndpointBuilder<Missing, M, P, F> {
    /// Sets the operation ID, e.g. `v2.ListEvents`.
    pub fn id(self, id: impl Into<String>) -> EndpointBuilder<Present, M, P, F> {
        EndpointBuilder {
            id: Some(id.into()),
            method: self.method,
            path: self.path,
            description: self.description,
            unstable: self.unstable,
            _phantom: PhantomData,
        }
    }
}

// Method setter - transitions Method from Missing to Present
impl<I, P, F: ResponseFormat> EndpointBuilder<I, Missing, P, F> {
    /// Sets the HTTP method for this endpoint.
    pub fn method(self, method: RestMethod) -> EndpointBuilder<I, Present, P, F> {
        EndpointBuilder {
            id: self.id,
            method: Some(method),
            path: self.path,
            description: self.description,
            unstable: self.unstable,
            _phantom: PhantomData,
        }
    }
}

// Path setter - transitions Path from Missing to Present
impl<I, M, F: ResponseFormat> EndpointBuilder<I, M, Missing, F> {
    /// Sets the URL path template.
    ///
    /// The path may contain parameter placeholders like `{incident_id}`.
    pub fn path(self, path: impl Into<String>) -> EndpointBuilder<I, M, Present, F> {
        EndpointBuilder {
            id: self.id,
            method: self.method,
            path: Some(path.into()),
            description: self.description,
            unstable: self.unstable,
            _phantom: PhantomData,
        }
    }
}

// Optional setters - available in any state
impl<I, M, P, F: ResponseFormat> EndpointBuilder<I, M, P, F> {
    /// Sets an optional description for this endpoint.
    pub fn description(self, description: impl Into<String>) -> Self {
        EndpointBuilder {
            description: Some(description.into()),
            ..self
        }
    }

    /// Marks the operation as unstable.
    pub fn unstable(self) -> Self {
        EndpointBuilder {
            unstable: true,
            ..self
        }
    }
}

// Build method - only available when all required fields are Present
impl<F: ResponseFormat> EndpointBuilder<Present, Present, Present, F> {
    /// Builds the endpoint.
    ///
    /// This method is only available when all required fields (id, method, path)
    /// have been set.
    pub fn build(self) -> Endpoint<F> {
        Endpoint {
            id: self.id.expect("id set via type state"),
            method: self.method.expect("method set via type state"),
            path: self.path.expect("path set via type state"),
            description: self.description,
            unstable: self.unstable,
            _format: PhantomData,
        }
    }
}
