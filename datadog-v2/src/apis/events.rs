//! Event Management operations.

use std::sync::Arc;

use api::model::Decoded;
use api::pagination::{paginate, PageStrategy, PagedRequest, Paginated};
use api::response::JsonFormat;
use api::{ApiClient, ApiError, CancellationToken, Configuration, Endpoint, RequestParts, RestMethod};
use tracing::debug;

use crate::models::{EventResponse, EventsListRequest, EventsListResponse, EventsSort};

type ListResponse = JsonFormat<Decoded<EventsListResponse>>;

fn list_events_endpoint() -> Endpoint<ListResponse> {
    Endpoint::builder()
        .id("v2.ListEvents")
        .method(RestMethod::Get)
        .path("/api/v2/events")
        .description("Get events matching a search query")
        .unstable()
        .build()
}

fn search_events_endpoint() -> Endpoint<ListResponse> {
    Endpoint::builder()
        .id("v2.SearchEvents")
        .method(RestMethod::Post)
        .path("/api/v2/events/search")
        .description("Search events with a structured query")
        .unstable()
        .build()
}

/// Optional parameters for [`EventsApi::list_events`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEventsOptionalParameters {
    /// Search query following the event search syntax.
    pub filter_query: Option<String>,
    /// Minimum timestamp for requested events.
    pub filter_from: Option<String>,
    /// Maximum timestamp for requested events.
    pub filter_to: Option<String>,
    pub sort: Option<EventsSort>,
    /// Cursor from a previous page's `meta.page.after`.
    pub page_cursor: Option<String>,
    /// Maximum number of events in the response.
    pub page_limit: Option<i32>,
}

impl ListEventsOptionalParameters {
    pub fn filter_query(mut self, value: impl Into<String>) -> Self {
        self.filter_query = Some(value.into());
        self
    }

    pub fn filter_from(mut self, value: impl Into<String>) -> Self {
        self.filter_from = Some(value.into());
        self
    }

    pub fn filter_to(mut self, value: impl Into<String>) -> Self {
        self.filter_to = Some(value.into());
        self
    }

    pub fn sort(mut self, value: EventsSort) -> Self {
        self.sort = Some(value);
        self
    }

    pub fn page_cursor(mut self, value: impl Into<String>) -> Self {
        self.page_cursor = Some(value.into());
        self
    }

    pub fn page_limit(mut self, value: i32) -> Self {
        self.page_limit = Some(value);
        self
    }

    fn to_parts(&self) -> RequestParts {
        RequestParts::new()
            .query_opt("filter[query]", self.filter_query.as_deref())
            .query_opt("filter[from]", self.filter_from.as_deref())
            .query_opt("filter[to]", self.filter_to.as_deref())
            .query_opt("sort", self.sort)
            .query_opt("page[cursor]", self.page_cursor.as_deref())
            .query_opt("page[limit]", self.page_limit)
    }
}

impl PagedRequest for ListEventsOptionalParameters {
    const STRATEGY: PageStrategy = PageStrategy::Cursor;

    fn page_size(&self) -> Option<i64> {
        self.page_limit.map(i64::from)
    }

    fn set_page_size(&mut self, size: i64) {
        self.page_limit = Some(i32::try_from(size).unwrap_or(i32::MAX));
    }

    fn set_page_cursor(&mut self, cursor: String) {
        self.page_cursor = Some(cursor);
    }
}

/// Optional parameters for [`EventsApi::search_events`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchEventsOptionalParameters {
    pub body: Option<EventsListRequest>,
}

impl SearchEventsOptionalParameters {
    pub fn body(mut self, body: EventsListRequest) -> Self {
        self.body = Some(body);
        self
    }
}

impl PagedRequest for SearchEventsOptionalParameters {
    const STRATEGY: PageStrategy = PageStrategy::Cursor;

    fn page_size(&self) -> Option<i64> {
        self.body.as_ref()?.page_limit().map(i64::from)
    }

    fn set_page_size(&mut self, size: i64) {
        let limit = i32::try_from(size).unwrap_or(i32::MAX);
        self.body
            .get_or_insert_with(EventsListRequest::default)
            .update_page(|page| page.limit = Some(limit));
    }

    fn set_page_cursor(&mut self, cursor: String) {
        self.body
            .get_or_insert_with(EventsListRequest::default)
            .update_page(|page| page.cursor = Some(cursor));
    }
}

/// Client for the Event Management endpoints.
///
/// Both operations are unstable and must be enabled on the
/// [`Configuration`] before use.
#[derive(Debug, Clone)]
pub struct EventsApi {
    client: Arc<ApiClient>,
}

impl EventsApi {
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

    /// Lists events matching the query, one page at a time.
    ///
    /// ## Errors
    ///
    /// Returns an error if the operation is not enabled, the request fails,
    /// or the response is missing a required field.
    pub async fn list_events(
        &self,
        params: ListEventsOptionalParameters,
    ) -> Result<Decoded<EventsListResponse>, ApiError> {
        self.client
            .execute(&list_events_endpoint(), params.to_parts())
            .await
    }

    /// Streams every event matching the query across pages.
    pub fn list_events_with_pagination(
        &self,
        params: ListEventsOptionalParameters,
    ) -> Paginated<Decoded<EventResponse>> {
        self.list_events_with_cancellation(params, CancellationToken::new())
    }

    /// Like [`list_events_with_pagination`](Self::list_events_with_pagination),
    /// stopping when `cancel` fires.
    pub fn list_events_with_cancellation(
        &self,
        params: ListEventsOptionalParameters,
        cancel: CancellationToken,
    ) -> Paginated<Decoded<EventResponse>> {
        debug!(operation = "v2.ListEvents", "starting pagination");
        let api = self.clone();
        paginate(params, cancel, move |params| {
            let api = api.clone();
            async move { api.list_events(params).await }
        })
    }

    /// Searches events with a structured query, one page at a time.
    ///
    /// ## Errors
    ///
    /// Returns an error if the operation is not enabled, the body cannot be
    /// encoded, the request fails, or the response is missing a required
    /// field.
    pub async fn search_events(
        &self,
        params: SearchEventsOptionalParameters,
    ) -> Result<Decoded<EventsListResponse>, ApiError> {
        let mut parts = RequestParts::new();
        if let Some(body) = &params.body {
            parts = parts.json_body(body)?;
        }
        self.client.execute(&search_events_endpoint(), parts).await
    }

    /// Streams every event matching the search across pages.
    pub fn search_events_with_pagination(
        &self,
        params: SearchEventsOptionalParameters,
    ) -> Paginated<Decoded<EventResponse>> {
        self.search_events_with_cancellation(params, CancellationToken::new())
    }

    /// Like [`search_events_with_pagination`](Self::search_events_with_pagination),
    /// stopping when `cancel` fires.
    pub fn search_events_with_cancellation(
        &self,
        params: SearchEventsOptionalParameters,
        cancel: CancellationToken,
    ) -> Paginated<Decoded<EventResponse>> {
        debug!(operation = "v2.SearchEvents", "starting pagination");
        let api = self.clone();
        paginate(params, cancel, move |params| {
            let api = api.clone();
            async move { api.search_events(params).await }
        })
    }
}
