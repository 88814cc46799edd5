//! Client configuration.
//!
//! [`Configuration`] holds everything needed to build an
//! [`ApiClient`](crate::ApiClient): the site to talk to, credentials,
//! transport settings, and which unstable operations the caller opted into.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::error::ConfigError;
use crate::operation_id::OperationId;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Site used when none is configured.
pub const DEFAULT_SITE: &str = "datadoghq.com";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "DD-API-KEY";

/// Header carrying the application key.
pub const APP_KEY_HEADER: &str = "DD-APPLICATION-KEY";

/// Operations that must be enabled explicitly before they can be called.
pub const UNSTABLE_OPERATIONS: &[&str] = &[
    "v2.ListEvents",
    "v2.SearchEvents",
    "v2.CreateIncident",
    "v2.DeleteIncident",
    "v2.GetIncident",
    "v2.ListIncidents",
    "v2.UpdateIncident",
];

/// Settings for an API client.
///
/// ## Examples
///
/// ```rust,ignore
/// use api::Configuration;
///
/// let mut config = Configuration::from_env();
/// config.set_unstable_operation_enabled("v2.ListIncidents", true)?;
/// let client = api::ApiClient::from_config(&config)?;
/// ```
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Datadog site, e.g. `datadoghq.com` or `datadoghq.eu`.
    pub site: String,
    /// Overrides the URL derived from `site`.
    pub base_url: Option<Url>,
    pub api_key: Option<String>,
    pub app_key: Option<String>,
    pub timeout: Duration,
    /// Ask for gzip-compressed responses.
    pub compress: bool,
    /// Log request and response summaries at debug level.
    pub debug: bool,
    pub user_agent: String,
    /// Extra headers sent with every request.
    pub default_headers: Vec<(String, String)>,
    pub unstable_operations: UnstableOperations,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.to_string(),
            base_url: None,
            api_key: None,
            app_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            compress: true,
            debug: false,
            user_agent: format!(
                "datadog-api-client-rust/{} ({} {})",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::OS,
                std::env::consts::ARCH
            ),
            default_headers: Vec::new(),
            unstable_operations: UnstableOperations::default(),
        }
    }
}

impl Configuration {
    /// Creates a configuration with defaults and no credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from the process environment.
    ///
    /// Reads `DD_SITE`, `DD_API_KEY`, `DD_APP_KEY` (or `DD_APPLICATION_KEY`)
    /// and `DD_DEBUG`. Unset or empty variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(site) = get("DD_SITE") {
            config.site = site;
        }
        config.api_key = get("DD_API_KEY");
        config.app_key = get("DD_APP_KEY").or_else(|| get("DD_APPLICATION_KEY"));
        config.debug = get("DD_DEBUG")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        config
    }

    /// Sets the site.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into();
        self
    }

    /// Sends all requests to `url` instead of the site's API host.
    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API and application keys.
    pub fn with_keys(mut self, api_key: impl Into<String>, app_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.app_key = Some(app_key.into());
        self
    }

    /// Returns the URL requests are sent to.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `site` does not form a valid host.
    pub fn server_url(&self) -> Result<Url, ConfigError> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Ok(Url::parse(&format!("https://api.{}", self.site))?),
        }
    }

    /// Enables or disables an unstable operation.
    ///
    /// ## Errors
    ///
    /// Returns an error if `operation` is not a valid operation ID or is not
    /// in the unstable registry.
    pub fn set_unstable_operation_enabled(
        &mut self,
        operation: &str,
        enabled: bool,
    ) -> Result<(), ConfigError> {
        self.unstable_operations.set_enabled(operation, enabled)
    }

    /// Returns `true` if `operation` is unstable and has been enabled.
    pub fn is_unstable_operation_enabled(&self, operation: &str) -> bool {
        self.unstable_operations.is_enabled(operation)
    }
}

/// Registry of unstable operations and whether each is enabled.
///
/// Every entry of [`UNSTABLE_OPERATIONS`] starts disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstableOperations(BTreeMap<OperationId, bool>);

impl Default for UnstableOperations {
    fn default() -> Self {
        Self(
            UNSTABLE_OPERATIONS
                .iter()
                .filter_map(|op| OperationId::new(*op).ok())
                .map(|op| (op, false))
                .collect(),
        )
    }
}

impl UnstableOperations {
    /// Enables or disables an operation in the registry.
    ///
    /// ## Errors
    ///
    /// Returns an error if `operation` is not a valid operation ID or is not
    /// in the registry.
    pub fn set_enabled(&mut self, operation: &str, enabled: bool) -> Result<(), ConfigError> {
        let id = OperationId::new(operation)?;
        match self.0.get_mut(&id) {
            Some(flag) => {
                *flag = enabled;
                Ok(())
            }
            None => {
                warn!(operation, "not an unstable operation");
                Err(ConfigError::UnknownUnstableOperation {
                    operation: operation.to_string(),
                })
            }
        }
    }

    /// Enables every operation in the registry.
    pub fn enable_all(&mut self) {
        for flag in self.0.values_mut() {
            *flag = true;
        }
    }

    /// Returns `true` if `operation` is in the registry and enabled.
    pub fn is_enabled(&self, operation: &str) -> bool {
        OperationId::new(operation)
            .ok()
            .and_then(|id| self.0.get(&id).copied())
            .unwrap_or(false)
    }

    /// Returns `true` if `operation` is in the registry.
    pub fn contains(&self, operation: &str) -> bool {
        OperationId::new(operation)
            .map(|id| self.0.contains_key(&id))
            .unwrap_or(false)
    }
}
