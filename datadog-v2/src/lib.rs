//! Datadog v2 API operations and models.
//!
//! Built on the [`api`] crate: each resource gets a client type holding a
//! shared [`ApiClient`](api::ApiClient), and every response record decodes
//! through [`Decoded`](api::Decoded) so unrecognized shapes surface as raw
//! JSON rather than errors.
//!
//! ## Resources
//!
//! - [`EventsApi`]: list and search events (unstable, cursor pagination)
//! - [`IncidentsApi`]: incident CRUD (unstable, offset pagination)
//! - [`LogsArchivesApi`]: archive CRUD and archive ordering
//!
//! ## Example
//!
//! ```rust,ignore
//! use datadog_v2::{IncidentsApi, ListIncidentsOptionalParameters};
//! use futures::StreamExt;
//!
//! let mut config = api::Configuration::from_env();
//! config.set_unstable_operation_enabled("v2.ListIncidents", true)?;
//!
//! let incidents = IncidentsApi::from_config(&config)?;
//! let mut stream = incidents.list_incidents_with_pagination(
//!     ListIncidentsOptionalParameters::default().page_size(50),
//! );
//! while let Some(incident) = stream.next().await {
//!     println!("{:?}", incident?);
//! }
//! ```

pub mod apis;
pub mod models;

pub use apis::*;
