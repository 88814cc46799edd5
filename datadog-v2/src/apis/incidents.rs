//! Incident Management operations.
//!
//! Every operation here is unstable: enable it with
//! [`Configuration::set_unstable_operation_enabled`] first, or calls fail
//! with [`ConfigError::UnstableOperationDisabled`](api::ConfigError::UnstableOperationDisabled).

use std::sync::Arc;

use api::model::Decoded;
use api::pagination::{paginate, PageStrategy, PagedRequest, Paginated};
use api::response::{EmptyFormat, JsonFormat};
use api::{ApiClient, ApiError, CancellationToken, Configuration, Endpoint, RequestParts, RestMethod};
use tracing::debug;

use crate::models::{
    IncidentCreateRequest, IncidentRelatedObject, IncidentResponse, IncidentResponseData,
    IncidentUpdateRequest, IncidentsResponse,
};

type SingleResponse = JsonFormat<Decoded<IncidentResponse>>;

fn create_incident_endpoint() -> Endpoint<SingleResponse> {
    Endpoint::builder()
        .id("v2.CreateIncident")
        .method(RestMethod::Post)
        .path("/api/v2/incidents")
        .unstable()
        .build()
}

fn delete_incident_endpoint() -> Endpoint<EmptyFormat> {
    Endpoint::builder()
        .id("v2.DeleteIncident")
        .method(RestMethod::Delete)
        .path("/api/v2/incidents/{incident_id}")
        .unstable()
        .build()
}

fn get_incident_endpoint() -> Endpoint<SingleResponse> {
    Endpoint::builder()
        .id("v2.GetIncident")
        .method(RestMethod::Get)
        .path("/api/v2/incidents/{incident_id}")
        .unstable()
        .build()
}

fn list_incidents_endpoint() -> Endpoint<JsonFormat<Decoded<IncidentsResponse>>> {
    Endpoint::builder()
        .id("v2.ListIncidents")
        .method(RestMethod::Get)
        .path("/api/v2/incidents")
        .unstable()
        .build()
}

fn update_incident_endpoint() -> Endpoint<SingleResponse> {
    Endpoint::builder()
        .id("v2.UpdateIncident")
        .method(RestMethod::Patch)
        .path("/api/v2/incidents/{incident_id}")
        .unstable()
        .build()
}

/// Related objects to include, for get and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetIncidentOptionalParameters {
    pub include: Vec<IncidentRelatedObject>,
}

impl GetIncidentOptionalParameters {
    pub fn include(mut self, include: Vec<IncidentRelatedObject>) -> Self {
        self.include = include;
        self
    }
}

pub type UpdateIncidentOptionalParameters = GetIncidentOptionalParameters;

/// Optional parameters for [`IncidentsApi::list_incidents`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListIncidentsOptionalParameters {
    pub include: Vec<IncidentRelatedObject>,
    /// Size of each page.
    pub page_size: Option<i64>,
    /// Index of the first incident to return.
    pub page_offset: Option<i64>,
}

impl ListIncidentsOptionalParameters {
    pub fn include(mut self, include: Vec<IncidentRelatedObject>) -> Self {
        self.include = include;
        self
    }

    pub fn page_size(mut self, size: i64) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn page_offset(mut self, offset: i64) -> Self {
        self.page_offset = Some(offset);
        self
    }

    fn to_parts(&self) -> RequestParts {
        RequestParts::new()
            .query_csv("include", &self.include)
            .query_opt("page[size]", self.page_size)
            .query_opt("page[offset]", self.page_offset)
    }
}

impl PagedRequest for ListIncidentsOptionalParameters {
    const STRATEGY: PageStrategy = PageStrategy::Offset;

    fn page_size(&self) -> Option<i64> {
        self.page_size
    }

    fn set_page_size(&mut self, size: i64) {
        self.page_size = Some(size);
    }

    fn page_offset(&self) -> Option<i64> {
        self.page_offset
    }

    fn set_page_offset(&mut self, offset: i64) {
        self.page_offset = Some(offset);
    }
}

/// Client for the Incident Management endpoints.
#[derive(Debug, Clone)]
pub struct IncidentsApi {
    client: Arc<ApiClient>,
}

impl IncidentsApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Builds a client from `config`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration cannot produce a client.
    pub fn from_config(config: &Configuration) -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(ApiClient::from_config(config)?)))
    }

    /// Creates an incident.
    pub async fn create_incident(
        &self,
        body: &IncidentCreateRequest,
    ) -> Result<Decoded<IncidentResponse>, ApiError> {
        let parts = RequestParts::new().json_body(body)?;
        self.client.execute(&create_incident_endpoint(), parts).await
    }

    /// Deletes an incident.
    pub async fn delete_incident(&self, incident_id: &str) -> Result<(), ApiError> {
        let parts = RequestParts::new().path_param("incident_id", incident_id);
        self.client.execute(&delete_incident_endpoint(), parts).await
    }

    /// Gets an incident, optionally with related objects.
    pub async fn get_incident(
        &self,
        incident_id: &str,
        params: GetIncidentOptionalParameters,
    ) -> Result<Decoded<IncidentResponse>, ApiError> {
        let parts = RequestParts::new()
            .path_param("incident_id", incident_id)
            .query_csv("include", &params.include);
        self.client.execute(&get_incident_endpoint(), parts).await
    }

    /// Lists one page of incidents.
    pub async fn list_incidents(
        &self,
        params: ListIncidentsOptionalParameters,
    ) -> Result<Decoded<IncidentsResponse>, ApiError> {
        self.client
            .execute(&list_incidents_endpoint(), params.to_parts())
            .await
    }

    /// Streams every incident, advancing the offset by the page size.
    pub fn list_incidents_with_pagination(
        &self,
        params: ListIncidentsOptionalParameters,
    ) -> Paginated<Decoded<IncidentResponseData>> {
        self.list_incidents_with_cancellation(params, CancellationToken::new())
    }

    /// Like [`list_incidents_with_pagination`](Self::list_incidents_with_pagination),
    /// stopping when `cancel` fires.
    pub fn list_incidents_with_cancellation(
        &self,
        params: ListIncidentsOptionalParameters,
        cancel: CancellationToken,
    ) -> Paginated<Decoded<IncidentResponseData>> {
        debug!(operation = "v2.ListIncidents", "starting pagination");
        let api = self.clone();
        paginate(params, cancel, move |params| {
            let api = api.clone();
            async move { api.list_incidents(params).await }
        })
    }

    /// Updates an incident. Only the attributes present in `body` change.
    pub async fn update_incident(
        &self,
        incident_id: &str,
        body: &IncidentUpdateRequest,
        params: UpdateIncidentOptionalParameters,
    ) -> Result<Decoded<IncidentResponse>, ApiError> {
        let parts = RequestParts::new()
            .path_param("incident_id", incident_id)
            .query_csv("include", &params.include)
            .json_body(body)?;
        self.client.execute(&update_incident_endpoint(), parts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_query_names() {
        let parts = ListIncidentsOptionalParameters::default()
            .include(vec![IncidentRelatedObject::Users, IncidentRelatedObject::Attachments])
            .page_size(20)
            .page_offset(40)
            .to_parts();
        assert_eq!(
            parts.query_pairs(),
            &[
                ("include", "users,attachments".to_string()),
                ("page[size]", "20".to_string()),
                ("page[offset]", "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_every_endpoint_is_unstable() {
        assert!(create_incident_endpoint().is_unstable());
        assert!(delete_incident_endpoint().is_unstable());
        assert!(get_incident_endpoint().is_unstable());
        assert!(list_incidents_endpoint().is_unstable());
        assert!(update_incident_endpoint().is_unstable());
    }
}
