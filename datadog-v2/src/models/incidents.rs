//! Incident Management models.

use std::collections::BTreeMap;

use api::model::{candidate, Decoded, OneOf, Variants};
use api::pagination::{Page, PagedResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::rust::double_option;
use strum::Display;

/// Incident resource type. Always `incidents`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncidentType {
    #[default]
    #[serde(rename = "incidents")]
    Incidents,
}

/// Objects related to an incident that can be included in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentRelatedObject {
    Users,
    Attachments,
}

/// Type of a single value field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentFieldAttributesSingleValueType {
    #[default]
    Dropdown,
    Textbox,
}

/// Type of a multiple value field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentFieldAttributesValueType {
    #[default]
    Multiselect,
    Textarray,
    Metrictag,
    Autocomplete,
}

/// A field with a single value selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentFieldAttributesSingleValue {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<IncidentFieldAttributesSingleValueType>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub value: Option<Option<String>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentFieldAttributesSingleValue);

/// A field with potentially multiple values selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentFieldAttributesMultipleValue {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<IncidentFieldAttributesValueType>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub value: Option<Option<Vec<String>>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentFieldAttributesMultipleValue);

/// The shapes an incident field value can take.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IncidentFieldAttributesVariant {
    SingleValue(IncidentFieldAttributesSingleValue),
    MultipleValue(IncidentFieldAttributesMultipleValue),
}

impl Variants for IncidentFieldAttributesVariant {
    fn candidates(value: &Value) -> Vec<Self> {
        let mut found = Vec::new();
        if let Some(v) = candidate::<IncidentFieldAttributesSingleValue>(value) {
            found.push(Self::SingleValue(v));
        }
        if let Some(v) = candidate::<IncidentFieldAttributesMultipleValue>(value) {
            found.push(Self::MultipleValue(v));
        }
        found
    }
}

/// Dynamic fields for which selections can be made.
pub type IncidentFieldAttributes = OneOf<IncidentFieldAttributesVariant>;

/// A notification handle that will be notified at incident creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentNotificationHandle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// The email address used for the notification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentNotificationHandle);

/// The incident's attributes for a create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentCreateAttributes {
    /// Required if `customer_impacted` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_scope: Option<String>,
    pub customer_impacted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, IncidentFieldAttributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_handles: Option<Vec<Decoded<IncidentNotificationHandle>>>,
    pub title: String,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentCreateAttributes {
    required: [customer_impacted, title],
});

impl IncidentCreateAttributes {
    pub fn new(customer_impacted: bool, title: impl Into<String>) -> Self {
        Self {
            customer_impacted,
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Incident data for a create request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentCreateData {
    pub attributes: Decoded<IncidentCreateAttributes>,
    #[serde(rename = "type")]
    pub type_: IncidentType,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentCreateData {
    required: [attributes, type_ = "type"],
    nested: [attributes],
});

/// Create request for an incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentCreateRequest {
    pub data: Decoded<IncidentCreateData>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentCreateRequest {
    required: [data],
    nested: [data],
});

impl IncidentCreateRequest {
    /// A create request for `attributes`.
    pub fn new(attributes: IncidentCreateAttributes) -> Self {
        Self {
            data: IncidentCreateData {
                attributes: attributes.into(),
                ..Default::default()
            }
            .into(),
            additional_properties: Map::new(),
        }
    }
}

/// The incident's attributes from a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponseAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Length of the incident's customer impact in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_duration: Option<i64>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_impact_end: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_impact_scope: Option<Option<String>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_impact_start: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impacted: Option<bool>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub detected: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, IncidentFieldAttributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub notification_handles: Option<Option<Vec<Decoded<IncidentNotificationHandle>>>>,
    /// The monotonically increasing integer ID for the incident.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<i64>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Option<DateTime<Utc>>>,
    /// Seconds from detection to the first response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_detect: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_internal_response: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_repair: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_resolve: Option<i64>,
    pub title: String,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentResponseAttributes { required: [title] });

/// Incident data from a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Decoded<IncidentResponseAttributes>>,
    pub id: String,
    #[serde(rename = "type")]
    pub type_: IncidentType,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentResponseData {
    required: [id, type_ = "type"],
    nested: [attributes],
});

/// Response with an incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponse {
    pub data: Decoded<IncidentResponseData>,
    /// Related users and attachments, as returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Value>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentResponse {
    required: [data],
    nested: [data],
});

/// Pagination properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponseMetaPagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentResponseMetaPagination);

/// The metadata object containing pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Decoded<IncidentResponseMetaPagination>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentResponseMeta { nested: [pagination] });

/// Response with a list of incidents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentsResponse {
    pub data: Vec<Decoded<IncidentResponseData>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Decoded<IncidentResponseMeta>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentsResponse {
    required: [data],
    nested: [meta],
});

impl PagedResponse for IncidentsResponse {
    type Item = Decoded<IncidentResponseData>;

    fn into_page(self) -> Option<Page<Self::Item>> {
        Some(Page {
            items: self.data,
            next_cursor: None,
        })
    }
}

/// The incident's attributes for an update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdateAttributes {
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_impact_end: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impact_scope: Option<String>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub customer_impact_start: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_impacted: Option<bool>,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub detected: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, IncidentFieldAttributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_handles: Option<Vec<Decoded<IncidentNotificationHandle>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentUpdateAttributes);

/// Incident data for an update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdateData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Decoded<IncidentUpdateAttributes>>,
    pub id: String,
    #[serde(rename = "type")]
    pub type_: IncidentType,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentUpdateData {
    required: [id, type_ = "type"],
    nested: [attributes],
});

/// Update request for an incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentUpdateRequest {
    pub data: Decoded<IncidentUpdateData>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(IncidentUpdateRequest {
    required: [data],
    nested: [data],
});

impl IncidentUpdateRequest {
    /// An update request for incident `id`.
    pub fn new(id: impl Into<String>, attributes: IncidentUpdateAttributes) -> Self {
        Self {
            data: IncidentUpdateData {
                attributes: Some(attributes.into()),
                id: id.into(),
                ..Default::default()
            }
            .into(),
            additional_properties: Map::new(),
        }
    }
}
