//! Logs archive operations.

use std::sync::Arc;

use api::model::Decoded;
use api::response::{EmptyFormat, JsonFormat};
use api::{ApiClient, ApiError, Configuration, Endpoint, RequestParts, RestMethod};

use crate::models::{LogsArchive, LogsArchiveCreateRequest, LogsArchiveOrder, LogsArchives};

type ArchiveResponse = JsonFormat<Decoded<LogsArchive>>;
type OrderResponse = JsonFormat<Decoded<LogsArchiveOrder>>;

const ARCHIVES_PATH: &str = "/api/v2/logs/config/archives";
const ARCHIVE_PATH: &str = "/api/v2/logs/config/archives/{archive_id}";
const ARCHIVE_ORDER_PATH: &str = "/api/v2/logs/config/archive-order";

fn create_logs_archive_endpoint() -> Endpoint<ArchiveResponse> {
    Endpoint::builder()
        .id("v2.CreateLogsArchive")
        .method(RestMethod::Post)
        .path(ARCHIVES_PATH)
        .build()
}

fn delete_logs_archive_endpoint() -> Endpoint<EmptyFormat> {
    Endpoint::builder()
        .id("v2.DeleteLogsArchive")
        .method(RestMethod::Delete)
        .path(ARCHIVE_PATH)
        .build()
}

fn get_logs_archive_endpoint() -> Endpoint<ArchiveResponse> {
    Endpoint::builder()
        .id("v2.GetLogsArchive")
        .method(RestMethod::Get)
        .path(ARCHIVE_PATH)
        .build()
}

fn get_logs_archive_order_endpoint() -> Endpoint<OrderResponse> {
    Endpoint::builder()
        .id("v2.GetLogsArchiveOrder")
        .method(RestMethod::Get)
        .path(ARCHIVE_ORDER_PATH)
        .build()
}

fn list_logs_archives_endpoint() -> Endpoint<JsonFormat<Decoded<LogsArchives>>> {
    Endpoint::builder()
        .id("v2.ListLogsArchives")
        .method(RestMethod::Get)
        .path(ARCHIVES_PATH)
        .build()
}

fn update_logs_archive_endpoint() -> Endpoint<ArchiveResponse> {
    Endpoint::builder()
        .id("v2.UpdateLogsArchive")
        .method(RestMethod::Put)
        .path(ARCHIVE_PATH)
        .build()
}

fn update_logs_archive_order_endpoint() -> Endpoint<OrderResponse> {
    Endpoint::builder()
        .id("v2.UpdateLogsArchiveOrder")
        .method(RestMethod::Put)
        .path(ARCHIVE_ORDER_PATH)
        .build()
}

/// Client for the logs archive configuration endpoints.
#[derive(Debug, Clone)]
pub struct LogsArchivesApi {
    client: Arc<ApiClient>,
}

impl LogsArchivesApi {
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

    /// Creates an archive.
    pub async fn create_logs_archive(
        &self,
        body: &LogsArchiveCreateRequest,
    ) -> Result<Decoded<LogsArchive>, ApiError> {
        let parts = RequestParts::new().json_body(body)?;
        self.client
            .execute(&create_logs_archive_endpoint(), parts)
            .await
    }

    /// Deletes an archive.
    pub async fn delete_logs_archive(&self, archive_id: &str) -> Result<(), ApiError> {
        let parts = RequestParts::new().path_param("archive_id", archive_id);
        self.client
            .execute(&delete_logs_archive_endpoint(), parts)
            .await
    }

    pub async fn get_logs_archive(&self, archive_id: &str) -> Result<Decoded<LogsArchive>, ApiError> {
        let parts = RequestParts::new().path_param("archive_id", archive_id);
        self.client.execute(&get_logs_archive_endpoint(), parts).await
    }

    /// Gets the order in which archives are matched against incoming logs.
    pub async fn get_logs_archive_order(&self) -> Result<Decoded<LogsArchiveOrder>, ApiError> {
        self.client
            .execute(&get_logs_archive_order_endpoint(), RequestParts::new())
            .await
    }

    pub async fn list_logs_archives(&self) -> Result<Decoded<LogsArchives>, ApiError> {
        self.client
            .execute(&list_logs_archives_endpoint(), RequestParts::new())
            .await
    }

    /// Replaces an archive's configuration.
    ///
    /// The whole definition is replaced, not merged.
    pub async fn update_logs_archive(
        &self,
        archive_id: &str,
        body: &LogsArchiveCreateRequest,
    ) -> Result<Decoded<LogsArchive>, ApiError> {
        let parts = RequestParts::new()
            .path_param("archive_id", archive_id)
            .json_body(body)?;
        self.client
            .execute(&update_logs_archive_endpoint(), parts)
            .await
    }

    /// Replaces the archive order.
    ///
    /// The body must list every existing archive ID.
    pub async fn update_logs_archive_order(
        &self,
        body: &LogsArchiveOrder,
    ) -> Result<Decoded<LogsArchiveOrder>, ApiError> {
        let parts = RequestParts::new().json_body(body)?;
        self.client
            .execute(&update_logs_archive_order_endpoint(), parts)
            .await
    }
}
