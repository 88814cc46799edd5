use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::{json_type, Model};
use crate::error::ValidationError;

/// A record decoded either into its typed shape or kept as raw JSON.
///
/// Decoding follows these rules, in order:
///
/// 1. The payload must be a JSON object.
/// 2. Every [`Model::REQUIRED`] field must be present, otherwise decoding
///    fails with [`ValidationError::MissingRequiredField`].
/// 3. Every present required field must decode as its declared type,
///    otherwise decoding fails with
///    [`ValidationError::InvalidRequiredField`]. An unknown enum value is not
///    a shape error.
/// 4. If the typed decode fails (wrong type on an optional field, unknown enum
///    value, an optional nested record missing one of its required fields),
///    the original object is kept as [`Decoded::Unparsed`].
/// 5. If the typed decode succeeds but a nested record fell back, the
///    original object is kept as [`Decoded::Unparsed`] as well.
///
/// Encoding an `Unparsed` record writes the raw object back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The payload matched the typed shape.
    Typed(T),
    /// The payload did not match; this is the original object.
    Unparsed(Map<String, Value>),
}

impl<T: Model> Decoded<T> {
    /// Decodes a record from a JSON value.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::ExpectedObject`] for non-object payloads,
    /// [`ValidationError::MissingRequiredField`] naming the first absent
    /// required field and [`ValidationError::InvalidRequiredField`] naming
    /// the first malformed one.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ValidationError::ExpectedObject {
                    found: json_type(&other),
                })
            }
        };

        if let Some(missing) = T::REQUIRED.iter().find(|r| !r.is_satisfied_by(&object)) {
            return Err(ValidationError::MissingRequiredField {
                field: missing.name(),
            });
        }
        T::check_required(&object)?;

        match serde_json::from_value::<T>(Value::Object(object.clone())) {
            Ok(typed) if !typed.has_unparsed_field() => Ok(Self::Typed(typed)),
            Ok(_) => {
                debug!(
                    model = std::any::type_name::<T>(),
                    "nested record unparsed; keeping raw object"
                );
                Ok(Self::Unparsed(object))
            }
            Err(error) => {
                debug!(
                    model = std::any::type_name::<T>(),
                    %error,
                    "payload does not match typed shape; keeping raw object"
                );
                Ok(Self::Unparsed(object))
            }
        }
    }
}

impl<T> Decoded<T> {
    /// Returns the typed record, if decoding matched.
    pub fn typed(&self) -> Option<&T> {
        match self {
            Self::Typed(t) => Some(t),
            Self::Unparsed(_) => None,
        }
    }

    /// Returns the typed record mutably, if decoding matched.
    pub fn typed_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Typed(t) => Some(t),
            Self::Unparsed(_) => None,
        }
    }

    /// Consumes the wrapper, returning the typed record if decoding matched.
    pub fn into_typed(self) -> Option<T> {
        match self {
            Self::Typed(t) => Some(t),
            Self::Unparsed(_) => None,
        }
    }

    /// Returns the raw object, if decoding fell back.
    pub fn unparsed(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Typed(_) => None,
            Self::Unparsed(raw) => Some(raw),
        }
    }

    /// Returns `true` if decoding fell back to raw JSON.
    pub fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed(_))
    }
}

impl<T> From<T> for Decoded<T> {
    fn from(typed: T) -> Self {
        Self::Typed(typed)
    }
}

impl<T: Default> Default for Decoded<T> {
    fn default() -> Self {
        Self::Typed(T::default())
    }
}

impl<T: Serialize> Serialize for Decoded<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Typed(t) => t.serialize(serializer),
            Self::Unparsed(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, T: Model> Deserialize<'de> for Decoded<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(de::Error::custom)
    }
}
