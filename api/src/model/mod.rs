//! Forward-compatible model decoding.
//!
//! API payloads evolve faster than clients. A record that no longer matches
//! its typed shape (new enum value, changed field type) is kept as raw JSON
//! instead of failing the whole call:
//!
//! - [`Decoded`] wraps a record: [`Decoded::Typed`] or [`Decoded::Unparsed`].
//! - [`OneOf`] wraps a union: exactly one matching variant, or the raw value.
//! - [`Model`] describes the required fields and nested records a type has;
//!   implement it with [`impl_model!`](crate::impl_model).
//!
//! Only a missing or malformed required field (or a non-object payload) is a
//! hard error.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use api::model::Decoded;
//!
//! let attrs: Decoded<IncidentResponseAttributes> = serde_json::from_value(json)?;
//! match attrs {
//!     Decoded::Typed(a) => println!("{}", a.title),
//!     Decoded::Unparsed(raw) => println!("unrecognized shape: {raw:?}"),
//! }
//! ```

mod decoded;
mod one_of;

pub use decoded::Decoded;
pub use one_of::{candidate, OneOf, Variants};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// A field that must be present in the JSON object for decoding to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Required {
    name: &'static str,
    nullable: bool,
}

impl Required {
    /// A required field that must be present and not `null`.
    pub const fn field(name: &'static str) -> Self {
        Self {
            name,
            nullable: false,
        }
    }

    /// A required field for which an explicit `null` counts as present.
    pub const fn nullable(name: &'static str) -> Self {
        Self {
            name,
            nullable: true,
        }
    }

    /// Returns the JSON field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if `object` carries this field.
    pub fn is_satisfied_by(&self, object: &Map<String, Value>) -> bool {
        match object.get(self.name) {
            None => false,
            Some(Value::Null) => self.nullable,
            Some(_) => true,
        }
    }
}

/// A typed API record.
///
/// Implementors capture unknown keys in an `additional_properties` map
/// (`#[serde(flatten)]`) so they survive a decode/encode round trip.
pub trait Model: Serialize + DeserializeOwned {
    /// Fields whose absence is a hard decode error.
    const REQUIRED: &'static [Required] = &[];

    /// Fails if a present required field does not have the JSON shape its
    /// type expects.
    fn check_required(_object: &Map<String, Value>) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Returns `true` if a directly nested record fell back to raw JSON.
    ///
    /// A record with such a child is itself kept as raw JSON.
    fn has_unparsed_field(&self) -> bool {
        false
    }

    /// Keys the payload carried that the typed shape does not declare.
    fn additional_properties(&self) -> &Map<String, Value>;
}

/// Anything that can hold a record which fell back to raw JSON.
pub trait Nested {
    /// Returns `true` if the held record is [`Decoded::Unparsed`].
    fn is_unparsed(&self) -> bool;
}

impl<T> Nested for Decoded<T> {
    fn is_unparsed(&self) -> bool {
        Decoded::is_unparsed(self)
    }
}

impl<N: Nested> Nested for Option<N> {
    fn is_unparsed(&self) -> bool {
        self.as_ref().is_some_and(Nested::is_unparsed)
    }
}

/// Implements [`Model`] for a struct with an `additional_properties` map.
///
/// ```rust,ignore
/// api::impl_model!(IncidentResponseData {
///     required: [id, type_ = "type"],
///     nested: [attributes],
/// });
/// api::impl_model!(LogsArchiveAttributes {
///     required: [name, query],
///     nullable: [destination],
/// });
/// api::impl_model!(EventsWarning);
/// ```
///
/// - `required`: fields that must be present and non-null. An entry is the
///   struct field, followed by `= "json_name"` when the JSON key differs.
/// - `nullable`: fields that must be present but may be `null`.
/// - `nested`: struct fields holding a [`Decoded`] record; if any fell back,
///   the whole record falls back.
#[macro_export]
macro_rules! impl_model {
    ($ty:ty $({
        $(required: [$($req:ident $(= $req_json:literal)?),* $(,)?] $(,)?)?
        $(nullable: [$($null:ident $(= $null_json:literal)?),* $(,)?] $(,)?)?
        $(nested: [$($field:ident),* $(,)?] $(,)?)?
    })?) => {
        impl $crate::model::Model for $ty {
            const REQUIRED: &'static [$crate::model::Required] = &[
                $($($($crate::model::Required::field(
                    $crate::__json_name!($req $(, $req_json)?),
                ),)*)?)?
                $($($($crate::model::Required::nullable(
                    $crate::__json_name!($null $(, $null_json)?),
                ),)*)?)?
            ];

            #[allow(unused_variables)]
            fn check_required(
                object: &$crate::serde_json::Map<::std::string::String, $crate::serde_json::Value>,
            ) -> ::std::result::Result<(), $crate::ValidationError> {
                $($($($crate::model::check_shape::<Self, _, _>(
                    object,
                    $crate::__json_name!($req $(, $req_json)?),
                    |model: &Self| &model.$req,
                )?;)*)?)?
                $($($($crate::model::check_shape::<Self, _, _>(
                    object,
                    $crate::__json_name!($null $(, $null_json)?),
                    |model: &Self| &model.$null,
                )?;)*)?)?
                ::std::result::Result::Ok(())
            }

            fn has_unparsed_field(&self) -> bool {
                false $($($(|| $crate::model::Nested::is_unparsed(&self.$field))*)?)?
            }

            fn additional_properties(
                &self,
            ) -> &$crate::serde_json::Map<::std::string::String, $crate::serde_json::Value> {
                &self.additional_properties
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __json_name {
    ($field:ident) => {
        ::std::stringify!($field)
    };
    ($field:ident, $json:literal) => {
        $json
    };
}

/// Checks that the value under `name` decodes as the type of the struct
/// field the accessor selects.
///
/// An unknown enum value is not a shape error: the record falls back to
/// raw JSON later instead. Absent keys are left to the presence check.
#[doc(hidden)]
pub fn check_shape<M, F, S>(
    object: &Map<String, Value>,
    name: &'static str,
    _field: S,
) -> Result<(), ValidationError>
where
    F: DeserializeOwned,
    S: Fn(&M) -> &F,
{
    let Some(value) = object.get(name) else {
        return Ok(());
    };
    match serde_json::from_value::<F>(value.clone()) {
        Ok(_) => Ok(()),
        Err(error) if value.is_string() && is_unknown_variant(&error) => Ok(()),
        Err(error) => Err(ValidationError::InvalidRequiredField {
            field: name,
            message: error.to_string(),
        }),
    }
}

fn is_unknown_variant(error: &serde_json::Error) -> bool {
    error.to_string().starts_with("unknown variant")
}

/// Names the JSON type of `value` for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    enum Kind {
        #[serde(rename = "archive")]
        Archive,
    }

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Tag {
        label: String,
        #[serde(flatten)]
        additional_properties: Map<String, Value>,
    }
    crate::impl_model!(Tag { required: [label], });

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Record {
        name: String,
        #[serde(rename = "type")]
        type_: Kind,
        #[serde(default)]
        target: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tag: Option<Decoded<Tag>>,
        #[serde(flatten)]
        additional_properties: Map<String, Value>,
    }
    crate::impl_model!(Record {
        required: [
            name,
            type_ = "type",
        ],
        nullable: [target],
        nested: [tag],
    });

    #[test]
    fn test_impl_model_declares_fields() {
        let names: Vec<_> = Record::REQUIRED.iter().map(Required::name).collect();
        assert_eq!(names, ["name", "type", "target"]);
        assert_eq!(Record::REQUIRED[2], Required::nullable("target"));
        assert_eq!(Tag::REQUIRED, &[Required::field("label")]);

        let record = Record {
            name: "main".to_string(),
            type_: Kind::Archive,
            target: None,
            tag: Some(Decoded::Unparsed(Map::new())),
            additional_properties: Map::new(),
        };
        assert!(record.has_unparsed_field());
        assert!(Model::additional_properties(&record).is_empty());
    }

    #[test]
    fn test_check_required_rejects_wrong_shape() {
        let object = json!({ "name": ["main"], "type": "archive", "target": null });
        let err = Record::check_required(object.as_object().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidRequiredField { field: "name", .. }
        ));

        let object = json!({ "name": "main", "type": 3, "target": null });
        let err = Record::check_required(object.as_object().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidRequiredField { field: "type", .. }
        ));
    }

    #[test]
    fn test_check_required_leaves_unknown_variants_and_nulls() {
        let object = json!({ "name": "main", "type": "bucket", "target": null });
        assert!(Record::check_required(object.as_object().unwrap()).is_ok());

        let object = json!({ "name": "main", "type": "archive", "target": "s3" });
        assert!(Record::check_required(object.as_object().unwrap()).is_ok());
    }

    #[test]
    fn test_required_field_presence() {
        let object = json!({ "title": "outage", "destination": null });
        let object = object.as_object().unwrap();

        assert!(Required::field("title").is_satisfied_by(object));
        assert!(!Required::field("query").is_satisfied_by(object));
        assert!(!Required::field("destination").is_satisfied_by(object));
        assert!(Required::nullable("destination").is_satisfied_by(object));
        assert!(!Required::nullable("missing").is_satisfied_by(object));
    }

    #[test]
    fn test_nested_option() {
        let typed: Option<Decoded<Value>> = None;
        assert!(!typed.is_unparsed());

        let raw: Option<Option<Decoded<Value>>> = Some(Some(Decoded::Unparsed(Map::new())));
        assert!(raw.is_unparsed());
    }

    #[test]
    fn test_json_type() {
        assert_eq!(json_type(&json!([1])), "array");
        assert_eq!(json_type(&json!(null)), "null");
    }
}
