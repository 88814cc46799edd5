//! HTTP client module.
//!
//! This module provides the async HTTP client for executing API operations
//! with credential handling and tracing instrumentation.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use api::client::{ApiClient, RequestParts};
//! use api::{Configuration, Endpoint, RestMethod};
//! use api::model::Decoded;
//! use api::response::JsonFormat;
//!
//! // Keys and site come from DD_API_KEY, DD_APP_KEY and DD_SITE
//! let client = ApiClient::from_config(&Configuration::from_env())?;
//!
//! let endpoint: Endpoint<JsonFormat<Decoded<LogsArchive>>> = Endpoint::builder()
//!     .id("v2.GetLogsArchive")
//!     .method(RestMethod::Get)
//!     .path("/api/v2/logs/config/archives/{archive_id}")
//!     .build();
//!
//! let archive = client
//!     .execute(&endpoint, RequestParts::new().path_param("archive_id", "abc"))
//!     .await?;
//! ```

mod executor;
mod request;

pub use executor::{ApiClient, ApiClientBuilder};
pub use request::RequestParts;
