//! Request execution with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] struct for executing HTTP requests
//! against API operations with credential handling, unstable-operation
//! gating, and tracing.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument, warn, Span};
use url::Url;

use super::request::RequestParts;
use crate::auth::ApiAuthMethod;
use crate::config::{
    Configuration, UnstableOperations, API_KEY_HEADER, APP_KEY_HEADER, DEFAULT_TIMEOUT_SECS,
};
use crate::endpoint::Endpoint;
use crate::error::{ApiError, AuthError, ClientError, ConfigError};
use crate::response::ResponseFormat;

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    auth: Vec<(ApiAuthMethod, String)>,
    compress: bool,
    debug: bool,
    unstable: UnstableOperations,
}

impl ApiClientBuilder {
    /// Creates a new builder with the specified base URL.
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            auth: Vec::new(),
            compress: true,
            debug: false,
            unstable: UnstableOperations::default(),
        }
    }

    /// Sets the request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(base_url)
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a default header to all requests.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let invalid = |message: String| ConfigError::InvalidHeader {
            name: name.as_ref().to_string(),
            message,
        };
        let header = HeaderName::try_from(name.as_ref()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::try_from(value.as_ref()).map_err(|e| invalid(e.to_string()))?;
        self.default_headers.insert(header, value);
        Ok(self)
    }

    /// Adds a credential. Every configured credential is sent on every request.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use api::ApiAuthMethod;
    ///
    /// let client = ApiClient::builder(base_url)
    ///     .auth(ApiAuthMethod::ApiKey("DD-API-KEY".into()), api_key)
    ///     .auth(ApiAuthMethod::ApiKey("DD-APPLICATION-KEY".into()), app_key)
    ///     .build()?;
    /// ```
    pub fn auth(mut self, method: ApiAuthMethod, secret: impl Into<String>) -> Self {
        self.auth.push((method, secret.into()));
        self
    }

    /// Enables or disables gzip response decoding.
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Enables debug logging of request and response summaries.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets which unstable operations may be called.
    pub fn unstable_operations(mut self, unstable: UnstableOperations) -> Self {
        self.unstable = unstable;
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns an error if a credential cannot be sent as a header or the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        // fail early on keys that can never be sent
        for (method, secret) in &self.auth {
            method.header(secret)?;
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .gzip(self.compress)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ClientError::Request)?;

        Ok(ApiClient {
            client,
            base_url: self.base_url,
            auth: self.auth,
            timeout: self.timeout,
            debug: self.debug,
            unstable: self.unstable,
        })
    }
}

/// Async HTTP client for executing API operations.
///
/// The client wraps `reqwest::Client` with connection pooling and provides
/// type-safe request execution with automatic credential handling.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::{ApiClient, Configuration, Endpoint, RequestParts, RestMethod};
/// use api::model::Decoded;
/// use api::response::JsonFormat;
///
/// let client = ApiClient::from_config(&Configuration::from_env())?;
///
/// let endpoint: Endpoint<JsonFormat<Decoded<LogsArchives>>> = Endpoint::builder()
///     .id("v2.ListLogsArchives")
///     .method(RestMethod::Get)
///     .path("/api/v2/logs/config/archives")
///     .build();
///
/// let archives = client.execute(&endpoint, RequestParts::new()).await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    auth: Vec<(ApiAuthMethod, String)>,
    timeout: Duration,
    debug: bool,
    unstable: UnstableOperations,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    ///
    /// ## Arguments
    ///
    /// * `base_url` - The base URL for all API requests.
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Creates a new API client with default settings and no credentials.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Creates a client from a [`Configuration`].
    ///
    /// The API key is sent as `DD-API-KEY` and the application key as
    /// `DD-APPLICATION-KEY` when configured.
    ///
    /// ## Errors
    ///
    /// Returns an error if the server URL, a default header, or a key is
    /// invalid.
    pub fn from_config(config: &Configuration) -> Result<Self, ApiError> {
        let mut builder = Self::builder(config.server_url()?)
            .timeout(config.timeout)
            .compress(config.compress)
            .debug(config.debug)
            .unstable_operations(config.unstable_operations.clone())
            .default_header(USER_AGENT.as_str(), &config.user_agent)?;

        for (name, value) in &config.default_headers {
            builder = builder.default_header(name, value)?;
        }
        if let Some(key) = &config.api_key {
            builder = builder.auth(ApiAuthMethod::ApiKey(API_KEY_HEADER.to_string()), key);
        }
        if let Some(key) = &config.app_key {
            builder = builder.auth(ApiAuthMethod::ApiKey(APP_KEY_HEADER.to_string()), key);
        }

        builder.build()
    }

    /// Returns the base URL for this client.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Executes an API operation and parses the response.
    ///
    /// ## Type Parameters
    ///
    /// * `F` - The [`ResponseFormat`] for parsing the response.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The operation is unstable and not enabled
    /// - A path parameter is missing
    /// - The request fails (network, timeout, etc.)
    /// - The server returns a non-success status code
    /// - The response cannot be parsed
    #[instrument(
        name = "api_request",
        skip(self, endpoint, request),
        fields(
            operation = endpoint.id(),
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<F>(
        &self,
        endpoint: &Endpoint<F>,
        request: RequestParts,
    ) -> Result<F::Output, ApiError>
    where
        F: ResponseFormat,
    {
        self.check_unstable(endpoint)?;

        Span::current().record("http.method", endpoint.method().to_string().as_str());
        let full_url = endpoint.full_url(&self.base_url, &request.path_params)?;
        Span::current().record("http.url", full_url.as_str());

        let mut builder = self
            .client
            .request(endpoint.method().to_reqwest(), full_url.clone())
            .header(ACCEPT, F::content_type());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if self.debug {
            debug!(
                method = %endpoint.method(),
                url = %full_url,
                query = ?request.query,
                credentials = ?self.redacted_credentials(),
                body = request.body.as_deref().map(String::from_utf8_lossy).as_deref(),
                "sending request"
            );
        }
        match request.body {
            Some(body) if !endpoint.method().is_read_only() => {
                builder = builder.header(CONTENT_TYPE, "application/json").body(body);
            }
            Some(_) => debug!(method = %endpoint.method(), "dropping body of read-only request"),
            None => {}
        }
        builder = self.apply_auth(builder)?;

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        if self.debug {
            debug!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "received response"
            );
        }

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            return Err(status_error(endpoint.id(), status, body));
        }

        Span::current().record("otel.status_code", "OK");

        let parsed = F::parse(body).await.map_err(ApiError::Validation)?;
        Ok(parsed)
    }

    /// Rejects unstable operations that were not enabled; warns on the rest.
    fn check_unstable<F: ResponseFormat>(&self, endpoint: &Endpoint<F>) -> Result<(), ConfigError> {
        if !endpoint.is_unstable() {
            return Ok(());
        }
        if !self.unstable.is_enabled(endpoint.id()) {
            return Err(ConfigError::UnstableOperationDisabled {
                operation: endpoint.id().to_string(),
            });
        }
        warn!("Using unstable operation '{}'", endpoint.id());
        Ok(())
    }

    /// Applies every configured credential to a request builder.
    fn apply_auth(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        for (method, secret) in &self.auth {
            let (name, value) = method.header(secret)?;
            request = request.header(name, value);
        }
        Ok(request)
    }

    fn redacted_credentials(&self) -> Vec<String> {
        self.auth
            .iter()
            .map(|(method, _)| match method {
                ApiAuthMethod::ApiKey(header) => format!("{header}: REDACTED"),
                ApiAuthMethod::BearerToken => "Authorization: Bearer REDACTED".to_string(),
            })
            .collect()
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ClientError::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
            .into()
        } else if error.is_connect() {
            ClientError::Connection(error.to_string()).into()
        } else {
            ClientError::Request(error).into()
        }
    }
}

/// The `{"errors": [...]}` envelope returned with non-2xx responses.
///
/// Entries are usually strings; some endpoints send objects with a
/// `detail` or `title`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<serde_json::Value>,
}

impl ErrorEnvelope {
    fn messages(self) -> Vec<String> {
        self.errors
            .into_iter()
            .map(|entry| match entry {
                serde_json::Value::String(s) => s,
                serde_json::Value::Object(ref obj) => obj
                    .get("detail")
                    .or_else(|| obj.get("title"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| entry.to_string()),
                other => other.to_string(),
            })
            .collect()
    }
}

/// Classifies a non-success response.
fn status_error(operation: &str, status: StatusCode, body: bytes::Bytes) -> ApiError {
    let errors = serde_json::from_slice::<ErrorEnvelope>(&body)
        .map(ErrorEnvelope::messages)
        .unwrap_or_default();
    let message = if errors.is_empty() {
        status.to_string()
    } else {
        errors.join("; ")
    };

    match status {
        StatusCode::UNAUTHORIZED => AuthError::AuthenticationFailed { message }.into(),
        StatusCode::FORBIDDEN => AuthError::InsufficientPermissions {
            operation: operation.to_string(),
            message,
        }
        .into(),
        _ => ClientError::HttpStatus {
            status: status.as_u16(),
            message,
            errors,
            body,
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::method::RestMethod;
    use crate::response::{EmptyFormat, JsonFormat};
    use tracing_test::traced_test;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct TestResponse {
        id: u64,
        name: String,
    }

    fn get_endpoint(path: &str) -> Endpoint<JsonFormat<TestResponse>> {
        Endpoint::builder()
            .id("v2.GetThing")
            .method(RestMethod::Get)
            .path(path)
            .build()
    }

    fn unstable_endpoint() -> Endpoint<JsonFormat<TestResponse>> {
        Endpoint::builder()
            .id("v2.ListIncidents")
            .method(RestMethod::Get)
            .path("/api/v2/incidents")
            .unstable()
            .build()
    }

    #[tokio::test]
    async fn test_execute_get_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/things/1"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 1,
                name: "Alice".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let result = client
            .execute(&get_endpoint("/things/1"), RequestParts::new())
            .await
            .unwrap();
        assert_eq!(result.id, 1);
        assert_eq!(result.name, "Alice");
    }

    #[tokio::test]
    async fn test_execute_with_path_and_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/things/a%2Fb"))
            .and(query_param("include", "users,attachments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 42,
                name: "Bob".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let parts = RequestParts::new()
            .path_param("thing_id", "a/b")
            .query_csv("include", ["users", "attachments"]);
        let result = client
            .execute(&get_endpoint("/things/{thing_id}"), parts)
            .await
            .unwrap();
        assert_eq!(result.id, 42);
    }

    #[tokio::test]
    async fn test_json_body_is_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/things"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "name": "new" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 7,
                name: "new".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();
        let endpoint: Endpoint<JsonFormat<TestResponse>> = Endpoint::builder()
            .id("v2.CreateThing")
            .method(RestMethod::Post)
            .path("/things")
            .build();

        let parts = RequestParts::new()
            .json_body(&serde_json::json!({ "name": "new" }))
            .unwrap();
        let result = client.execute(&endpoint, parts).await.unwrap();
        assert_eq!(result.id, 7);
    }

    #[tokio::test]
    async fn test_datadog_key_headers_from_config() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/things/1"))
            .and(header("dd-api-key", "api-key"))
            .and(header("dd-application-key", "app-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 1,
                name: "Keyed".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let config = Configuration::new()
            .with_base_url(Url::parse(&mock_server.uri()).unwrap())
            .with_keys("api-key", "app-key");
        let client = ApiClient::from_config(&config).unwrap();

        let result = client
            .execute(&get_endpoint("/things/1"), RequestParts::new())
            .await
            .unwrap();
        assert_eq!(result.name, "Keyed");
    }

    #[tokio::test]
    async fn test_user_agent_and_default_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/with-header"))
            .and(header("x-custom-header", "custom-value"))
            .and(header("user-agent", "dd-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 1,
                name: "CustomHeader".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let mut config = Configuration::new().with_base_url(Url::parse(&mock_server.uri()).unwrap());
        config.user_agent = "dd-test/1.0".to_string();
        config
            .default_headers
            .push(("X-Custom-Header".to_string(), "custom-value".to_string()));
        let client = ApiClient::from_config(&config).unwrap();

        let result = client
            .execute(&get_endpoint("/with-header"), RequestParts::new())
            .await
            .unwrap();
        assert_eq!(result.name, "CustomHeader");
    }

    #[tokio::test]
    async fn test_bearer_token_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/protected"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 1,
                name: "Protected".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::builder(base_url)
            .auth(ApiAuthMethod::BearerToken, "test-token")
            .build()
            .unwrap();

        let result = client
            .execute(&get_endpoint("/protected"), RequestParts::new())
            .await
            .unwrap();
        assert_eq!(result.name, "Protected");
    }

    #[test]
    fn test_invalid_key_rejected_at_build() {
        let base_url = Url::parse("https://api.datadoghq.com").unwrap();
        let result = ApiClient::builder(base_url)
            .auth(ApiAuthMethod::ApiKey(API_KEY_HEADER.to_string()), "bad\nkey")
            .build();
        assert!(matches!(
            result,
            Err(ApiError::Auth(AuthError::InvalidKeyFormat))
        ));
    }

    #[test]
    fn test_invalid_default_header() {
        let base_url = Url::parse("https://api.datadoghq.com").unwrap();
        let result = ApiClient::builder(base_url).default_header("bad header", "v");
        assert!(matches!(
            result,
            Err(ApiError::Config(ConfigError::InvalidHeader { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unstable_operation_disabled() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/incidents"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let err = client
            .execute(&unstable_endpoint(), RequestParts::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unstable operation 'v2.ListIncidents' is disabled");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_unstable_operation_enabled_warns() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/incidents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 9,
                name: "Incident".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let mut unstable = UnstableOperations::default();
        unstable.set_enabled("v2.ListIncidents", true).unwrap();
        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::builder(base_url)
            .unstable_operations(unstable)
            .build()
            .unwrap();

        let result = client
            .execute(&unstable_endpoint(), RequestParts::new())
            .await
            .unwrap();
        assert_eq!(result.id, 9);
        assert!(logs_contain("Using unstable operation 'v2.ListIncidents'"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_debug_logging_redacts_keys() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/things/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(TestResponse {
                id: 1,
                name: "Debug".to_string(),
            }))
            .mount(&mock_server)
            .await;

        let mut config = Configuration::new()
            .with_base_url(Url::parse(&mock_server.uri()).unwrap())
            .with_keys("super-secret-api", "super-secret-app");
        config.debug = true;
        let client = ApiClient::from_config(&config).unwrap();

        client
            .execute(&get_endpoint("/things/1"), RequestParts::new())
            .await
            .unwrap();
        assert!(logs_contain("DD-API-KEY: REDACTED"));
        assert!(!logs_contain("super-secret-api"));
        assert!(!logs_contain("super-secret-app"));
    }

    #[tokio::test]
    async fn test_http_error_401() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/unauthorized"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({ "errors": ["Unauthorized"] })),
            )
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let result = client
            .execute(&get_endpoint("/unauthorized"), RequestParts::new())
            .await;
        assert!(matches!(
            result,
            Err(ApiError::Auth(AuthError::AuthenticationFailed { ref message })) if message == "Unauthorized"
        ));
    }

    #[tokio::test]
    async fn test_http_error_403() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let result = client
            .execute(&get_endpoint("/forbidden"), RequestParts::new())
            .await;
        assert!(matches!(
            result,
            Err(ApiError::Auth(AuthError::InsufficientPermissions { ref operation, .. })) if operation == "v2.GetThing"
        ));
    }

    #[tokio::test]
    async fn test_http_error_keeps_body_and_messages() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errors": ["Not found", { "title": "Archive", "detail": "no such archive" }]
            })))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let err = client
            .execute(&get_endpoint("/missing"), RequestParts::new())
            .await
            .unwrap_err();
        let ApiError::Client(ClientError::HttpStatus {
            status,
            message,
            errors,
            body,
        }) = err
        else {
            panic!("expected HttpStatus, got {err:?}");
        };
        assert_eq!(status, 404);
        assert_eq!(errors, vec!["Not found", "no such archive"]);
        assert_eq!(message, "Not found; no such archive");
        assert!(String::from_utf8_lossy(&body).contains("no such archive"));
    }

    #[tokio::test]
    async fn test_http_error_500_plain_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/server-error"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let result = client
            .execute(&get_endpoint("/server-error"), RequestParts::new())
            .await;
        let Err(ApiError::Client(err)) = result else {
            panic!("expected client error");
        };
        assert_eq!(err.status_code(), Some(500));
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "HTTP 500: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn test_json_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/invalid-json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();

        let result = client
            .execute(&get_endpoint("/invalid-json"), RequestParts::new())
            .await;
        assert!(matches!(
            result,
            Err(ApiError::Validation(ValidationError::JsonParse(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/things/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let base_url = Url::parse(&mock_server.uri()).unwrap();
        let client = ApiClient::new(base_url).unwrap();
        let endpoint: Endpoint<EmptyFormat> = Endpoint::builder()
            .id("v2.DeleteThing")
            .method(RestMethod::Delete)
            .path("/things/{thing_id}")
            .build();

        client
            .execute(&endpoint, RequestParts::new().path_param("thing_id", "1"))
            .await
            .unwrap();
    }

    #[test]
    fn test_base_url_from_site() {
        let config = Configuration::new().with_site("datadoghq.eu");
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.datadoghq.eu/");
    }
}
