//! Typed REST client core for the Datadog HTTP API.
//!
//! The `api` crate provides the pieces every operation wrapper is built
//! from, independent of any particular API resource.
//!
//! ## Features
//!
//! - **Type-safe endpoints**: operations declare their method, path and response format
//! - **Async-first HTTP client**: built on `reqwest` with `tokio`, with
//!   `DD-API-KEY`/`DD-APPLICATION-KEY` credentials and unstable-operation gating
//! - **Forward-compatible models**: records that no longer match their typed shape
//!   are kept as raw JSON instead of failing the call
//! - **Pagination**: cursor and offset list operations as cancellable streams
//! - **Layered error handling**: structured errors for different failure modes
//!
//! ## Example
//!
//! ```rust,ignore
//! use api::{ApiClient, Configuration, Endpoint, RequestParts, RestMethod};
//! use api::model::Decoded;
//! use api::response::JsonFormat;
//!
//! let client = ApiClient::from_config(&Configuration::from_env())?;
//!
//! let list_archives: Endpoint<JsonFormat<Decoded<LogsArchives>>> = Endpoint::builder()
//!     .id("v2.ListLogsArchives")
//!     .method(RestMethod::Get)
//!     .path("/api/v2/logs/config/archives")
//!     .description("Get the list of configured logs archives")
//!     .build();
//!
//! let archives = client.execute(&list_archives, RequestParts::new()).await?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod model;
pub mod operation_id;
pub mod pagination;
pub mod response;

// Re-exports for convenience
pub use auth::ApiAuthMethod;
pub use client::{ApiClient, ApiClientBuilder, RequestParts};
pub use config::{Configuration, UnstableOperations};
pub use endpoint::{Endpoint, EndpointBuilder};
pub use error::{ApiError, AuthError, ClientError, ConfigError, ValidationError};
pub use method::RestMethod;
pub use model::{Decoded, Model, OneOf, Variants};
pub use operation_id::{OperationId, OperationIdError};
pub use pagination::{paginate, Page, PageStrategy, PagedRequest, PagedResponse, Paginated};
pub use response::ResponseFormat;

// Used by `impl_model!` expansions in downstream crates.
#[doc(hidden)]
pub use serde_json;
pub use tokio_util::sync::CancellationToken;
