//! Logs archive models.

use api::model::{candidate, Decoded, OneOf, Variants};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::rust::double_option;

/// The state of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogsArchiveState {
    Unknown,
    Working,
    Failing,
    WorkingAuthLegacy,
}

/// Type of an Azure destination. Always `azure`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogsArchiveDestinationAzureType {
    #[default]
    #[serde(rename = "azure")]
    Azure,
}

/// Type of a GCS destination. Always `gcs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogsArchiveDestinationGcsType {
    #[default]
    #[serde(rename = "gcs")]
    Gcs,
}

/// Type of an S3 destination. Always `s3`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogsArchiveDestinationS3Type {
    #[default]
    #[serde(rename = "s3")]
    S3,
}

/// Type of the archive order definition. Always `archive_order`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogsArchiveOrderDefinitionType {
    #[default]
    #[serde(rename = "archive_order")]
    ArchiveOrder,
}

/// The Azure archive's integration destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveIntegrationAzure {
    pub client_id: String,
    pub tenant_id: String,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveIntegrationAzure {
    required: [client_id, tenant_id],
});

/// The GCS archive's integration destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveIntegrationGcs {
    pub client_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveIntegrationGcs { required: [client_email] });

/// The S3 archive's integration destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveIntegrationS3 {
    pub account_id: String,
    pub role_name: String,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveIntegrationS3 {
    required: [account_id, role_name],
});

/// The Azure archive destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveDestinationAzure {
    /// The container where the archive is stored.
    pub container: String,
    pub integration: Decoded<LogsArchiveIntegrationAzure>,
    /// The archive path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub storage_account: String,
    #[serde(rename = "type")]
    pub type_: LogsArchiveDestinationAzureType,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveDestinationAzure {
    required: [container, integration, storage_account, type_ = "type"],
    nested: [integration],
});

/// The GCS archive destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveDestinationGcs {
    pub bucket: String,
    pub integration: Decoded<LogsArchiveIntegrationGcs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub type_: LogsArchiveDestinationGcsType,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveDestinationGcs {
    required: [bucket, integration, type_ = "type"],
    nested: [integration],
});

/// The S3 archive destination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveDestinationS3 {
    pub bucket: String,
    pub integration: Decoded<LogsArchiveIntegrationS3>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "type")]
    pub type_: LogsArchiveDestinationS3Type,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveDestinationS3 {
    required: [bucket, integration, type_ = "type"],
    nested: [integration],
});

/// The storage backends an archive can write to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogsArchiveDestinationVariant {
    Azure(LogsArchiveDestinationAzure),
    Gcs(LogsArchiveDestinationGcs),
    S3(LogsArchiveDestinationS3),
}

impl Variants for LogsArchiveDestinationVariant {
    fn candidates(value: &Value) -> Vec<Self> {
        let mut found = Vec::new();
        if let Some(v) = candidate::<LogsArchiveDestinationAzure>(value) {
            found.push(Self::Azure(v));
        }
        if let Some(v) = candidate::<LogsArchiveDestinationGcs>(value) {
            found.push(Self::Gcs(v));
        }
        if let Some(v) = candidate::<LogsArchiveDestinationS3>(value) {
            found.push(Self::S3(v));
        }
        found
    }
}

/// An archive's destination.
pub type LogsArchiveDestination = OneOf<LogsArchiveDestinationVariant>;

/// An archive's destination in a create or update request.
pub type LogsArchiveCreateRequestDestination = OneOf<LogsArchiveDestinationVariant>;

/// The attributes associated with an archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveAttributes {
    /// Required but may be `null` when the destination is not readable.
    #[serde(default)]
    pub destination: Option<LogsArchiveDestination>,
    /// Whether Datadog tags are stored in the archive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<bool>,
    pub name: String,
    /// The archive query/filter. Logs matching it are added to the archive.
    pub query: String,
    /// Maximum scan size for a rehydration from this archive, in GB.
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub rehydration_max_scan_size_in_gb: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rehydration_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<LogsArchiveState>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveAttributes {
    required: [name, query],
    nullable: [destination],
});

/// The definition of an archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Decoded<LogsArchiveAttributes>>,
    /// The archive ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Always `archives`.
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveDefinition {
    required: [type_ = "type"],
    nested: [attributes],
});

/// A single archive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchive {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Decoded<LogsArchiveDefinition>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchive { nested: [data] });

/// The available archives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchives {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Decoded<LogsArchiveDefinition>>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchives);

/// The attributes of an archive to create or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveCreateRequestAttributes {
    pub destination: LogsArchiveCreateRequestDestination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<bool>,
    pub name: String,
    pub query: String,
    #[serde(default, with = "double_option", skip_serializing_if = "Option::is_none")]
    pub rehydration_max_scan_size_in_gb: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rehydration_tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveCreateRequestAttributes {
    required: [destination, name, query],
});

impl LogsArchiveCreateRequestAttributes {
    pub fn new(
        destination: impl Into<LogsArchiveCreateRequestDestination>,
        name: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            name: name.into(),
            query: query.into(),
            include_tags: None,
            rehydration_max_scan_size_in_gb: None,
            rehydration_tags: None,
            additional_properties: Map::new(),
        }
    }
}

/// The definition of an archive to create or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveCreateRequestDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Decoded<LogsArchiveCreateRequestAttributes>>,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveCreateRequestDefinition {
    required: [type_ = "type"],
    nested: [attributes],
});

/// The logs archive create or update request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveCreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Decoded<LogsArchiveCreateRequestDefinition>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveCreateRequest { nested: [data] });

impl LogsArchiveCreateRequest {
    pub fn new(attributes: LogsArchiveCreateRequestAttributes) -> Self {
        Self {
            data: Some(
                LogsArchiveCreateRequestDefinition {
                    attributes: Some(attributes.into()),
                    type_: "archives".to_string(),
                    additional_properties: Map::new(),
                }
                .into(),
            ),
            additional_properties: Map::new(),
        }
    }
}

/// The attributes of an archive order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveOrderAttributes {
    /// Archive IDs in the order logs are tested against them.
    pub archive_ids: Vec<String>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveOrderAttributes { required: [archive_ids] });

/// The definition of an archive order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveOrderDefinition {
    pub attributes: Decoded<LogsArchiveOrderAttributes>,
    #[serde(rename = "type")]
    pub type_: LogsArchiveOrderDefinitionType,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveOrderDefinition {
    required: [attributes, type_ = "type"],
    nested: [attributes],
});

/// The order in which archives are matched against incoming logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsArchiveOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Decoded<LogsArchiveOrderDefinition>>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}
api::impl_model!(LogsArchiveOrder { nested: [data] });

impl LogsArchiveOrder {
    /// An order with `archive_ids`, first match wins.
    pub fn new<I, S>(archive_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = LogsArchiveOrderAttributes {
            archive_ids: archive_ids.into_iter().map(Into::into).collect(),
            additional_properties: Map::new(),
        };
        Self {
            data: Some(
                LogsArchiveOrderDefinition {
                    attributes: attributes.into(),
                    ..Default::default()
                }
                .into(),
            ),
            additional_properties: Map::new(),
        }
    }

    /// The archive IDs, if the order decoded.
    pub fn archive_ids(&self) -> Option<&[String]> {
        let definition = self.data.as_ref()?.typed()?;
        Some(definition.attributes.typed()?.archive_ids.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s3_destination() -> Value {
        json!({
            "bucket": "logs-bucket",
            "integration": { "account_id": "123456789012", "role_name": "archiver" },
            "path": "/dd",
            "type": "s3"
        })
    }

    #[test]
    fn test_destination_resolves_s3() {
        let destination: LogsArchiveDestination =
            serde_json::from_value(s3_destination()).unwrap();
        match destination.actual_instance() {
            Some(LogsArchiveDestinationVariant::S3(s3)) => assert_eq!(s3.bucket, "logs-bucket"),
            other => panic!("expected S3 destination, got {other:?}"),
        }
        assert_eq!(serde_json::to_value(&destination).unwrap(), s3_destination());
    }

    #[test]
    fn test_null_destination_is_kept() {
        let attributes: Decoded<LogsArchiveAttributes> = serde_json::from_value(json!({
            "destination": null,
            "name": "main",
            "query": "*"
        }))
        .unwrap();
        let attributes = attributes.into_typed().unwrap();
        assert!(attributes.destination.is_none());
        assert_eq!(
            serde_json::to_value(&attributes).unwrap(),
            json!({ "destination": null, "name": "main", "query": "*" })
        );
    }

    #[test]
    fn test_unknown_state_falls_back() {
        let attributes: Decoded<LogsArchiveAttributes> = serde_json::from_value(json!({
            "destination": null,
            "name": "main",
            "query": "*",
            "state": "PAUSED"
        }))
        .unwrap();
        assert!(attributes.is_unparsed());
    }

    #[test]
    fn test_order_archive_ids() {
        let order = LogsArchiveOrder::new(["a", "b"]);
        assert_eq!(order.archive_ids(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({
                "data": {
                    "attributes": { "archive_ids": ["a", "b"] },
                    "type": "archive_order"
                }
            })
        );
    }
}
