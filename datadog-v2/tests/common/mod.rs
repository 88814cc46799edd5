#![allow(dead_code)]

use std::sync::Arc;

use api::{ApiClient, Configuration};
use url::Url;
use wiremock::MockServer;

/// A configuration pointed at `server` with test keys.
pub fn config_for(server: &MockServer) -> Configuration {
    Configuration::new()
        .with_base_url(Url::parse(&server.uri()).unwrap())
        .with_keys("test-api-key", "test-app-key")
}

/// A client for `server` with every unstable operation enabled.
pub fn client_for(server: &MockServer) -> Arc<ApiClient> {
    let mut config = config_for(server);
    config.unstable_operations.enable_all();
    Arc::new(ApiClient::from_config(&config).unwrap())
}
