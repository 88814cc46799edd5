//! Event Management models.

use api::model::Decoded;
use api::pagination::{Page, PagedResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::rust::double_option;
use strum::Display;

/// Type of an event record. Always `event`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[default]
    #[serde(rename = "event")]
    Event,
}

/// Priority of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventPriority {
    Normal,
    Low,
}

/// Status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatusType {
    Failure,
    Error,
    Warning,
    Info,
    Success,
    UserUpdate,
    Recommendation,
    Snapshot,
}

/// Sort order for event queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum EventsSort {
    #[serde(rename = "timestamp")]
    #[strum(serialize = "timestamp")]
    TimestampAscending,
    #[serde(rename = "-timestamp")]
    #[strum(serialize = "-timestamp")]
    TimestampDescending,
}

/// The metadata of the underlying event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(Event);

/// Object description of attributes from your event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventAttributes {
    /// Aggregation key of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_key: Option<String>,
    /// POSIX timestamp of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_happened: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    /// Duration of the event in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evt: Option<Decoded<Event>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub monitor_groups: Option<Option<Vec<String>>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub monitor_id: Option<Option<i64>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<EventPriority>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_event_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sourcecategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatusType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// POSIX timestamp of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventAttributes { nested: [evt] });

/// The object description of an event response attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventResponseAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Decoded<EventAttributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventResponseAttributes { nested: [attributes] });

/// The object description of an event after being processed and stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Decoded<EventResponseAttributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<EventType>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventResponse { nested: [attributes] });

/// Links attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsListResponseLinks {
    /// Link for the next set of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsListResponseLinks);

/// Paging attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsResponseMetadataPage {
    /// Cursor to pass as `page[cursor]` to fetch the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsResponseMetadataPage);

/// A warning message indicating something is wrong with the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsWarning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsWarning);

/// The metadata associated with a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsResponseMetadata {
    /// Time elapsed in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Decoded<EventsResponseMetadataPage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Decoded<EventsWarning>>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsResponseMetadata { nested: [page] });

/// The response object with all events matching the request and pagination
/// information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Decoded<EventResponse>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Decoded<EventsListResponseLinks>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Decoded<EventsResponseMetadata>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsListResponse { nested: [links, meta] });

impl EventsListResponse {
    /// The `meta.page.after` cursor, if every level decoded.
    pub fn next_cursor(&self) -> Option<&str> {
        self.meta
            .as_ref()?
            .typed()?
            .page
            .as_ref()?
            .typed()?
            .after
            .as_deref()
    }
}

impl PagedResponse for EventsListResponse {
    type Item = Decoded<EventResponse>;

    fn into_page(self) -> Option<Page<Self::Item>> {
        let next_cursor = self.next_cursor().map(str::to_string);
        Some(Page {
            items: self.data?,
            next_cursor,
        })
    }
}

/// The search and filter query settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsQueryFilter {
    /// Minimum timestamp for requested events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Search query following the event search syntax.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Maximum timestamp for requested events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsQueryFilter);

impl Default for EventsQueryFilter {
    fn default() -> Self {
        Self {
            from: Some("now-15m".to_string()),
            query: Some("*".to_string()),
            to: Some("now".to_string()),
            additional_properties: Map::new(),
        }
    }
}

/// Global query options used during the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsQueryOptions {
    /// Time offset in seconds to apply to the query.
    #[serde(rename = "timeOffset", skip_serializing_if = "Option::is_none")]
    pub time_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsQueryOptions);

impl Default for EventsQueryOptions {
    fn default() -> Self {
        Self {
            time_offset: None,
            timezone: Some("UTC".to_string()),
            additional_properties: Map::new(),
        }
    }
}

/// Pagination settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsRequestPage {
    /// The returned paging point to use to get the next results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// The maximum number of events in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsRequestPage);

/// The object sent with the request to retrieve a list of events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Decoded<EventsQueryFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Decoded<EventsQueryOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Decoded<EventsRequestPage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<EventsSort>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(EventsListRequest { nested: [filter, options, page] });

impl EventsListRequest {
    /// Edits the page settings, creating them if absent.
    ///
    /// Page settings that were decoded as raw JSON are replaced.
    pub fn update_page(&mut self, edit: impl FnOnce(&mut EventsRequestPage)) {
        let mut page = match self.page.take() {
            Some(Decoded::Typed(page)) => page,
            _ => EventsRequestPage::default(),
        };
        edit(&mut page);
        self.page = Some(Decoded::Typed(page));
    }

    /// The page limit, if the page settings decoded.
    pub fn page_limit(&self) -> Option<i32> {
        self.page.as_ref()?.typed()?.limit
    }
}
