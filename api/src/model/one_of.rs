use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use super::{Decoded, Model};

/// A union that resolved to exactly one variant, or the raw payload.
///
/// Every variant is tried against the payload. A variant matches when it
/// decodes without error, without falling back to raw JSON, and does not
/// encode to an empty object. With exactly one match the variant is kept;
/// with none, or more than one, the payload is kept as [`OneOf::Unparsed`].
///
/// ## Examples
///
/// ```rust,ignore
/// let destination: OneOf<LogsArchiveDestinationVariant> = serde_json::from_value(json)?;
/// if let Some(LogsArchiveDestinationVariant::S3(s3)) = destination.actual_instance() {
///     println!("bucket {}", s3.bucket);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum OneOf<V> {
    /// Exactly one variant matched.
    Variant(V),
    /// No variant, or several, matched; this is the original payload.
    Unparsed(Value),
}

/// The closed set of variants of a union.
///
/// `Serialize` is expected to be untagged: each variant writes its own
/// object.
pub trait Variants: Serialize + Sized {
    /// Tries every variant against `value`, returning all that match.
    ///
    /// Implementations call [`candidate`] once per variant, in declaration
    /// order.
    fn candidates(value: &Value) -> Vec<Self>;
}

/// Decodes `value` as `T` if it is an acceptable union match.
///
/// A typed record that encodes to `{}` does not count as a match.
pub fn candidate<T: Model>(value: &Value) -> Option<T> {
    let Ok(Decoded::Typed(typed)) = Decoded::<T>::from_value(value.clone()) else {
        return None;
    };

    match serde_json::to_value(&typed) {
        Ok(Value::Object(fields)) if !fields.is_empty() => Some(typed),
        _ => None,
    }
}

impl<V> OneOf<V> {
    /// Returns the matched variant, if exactly one matched.
    pub fn actual_instance(&self) -> Option<&V> {
        match self {
            Self::Variant(v) => Some(v),
            Self::Unparsed(_) => None,
        }
    }

    /// Returns the raw payload, if the union did not resolve.
    pub fn unparsed(&self) -> Option<&Value> {
        match self {
            Self::Variant(_) => None,
            Self::Unparsed(raw) => Some(raw),
        }
    }

    /// Returns `true` if the union did not resolve to a single variant.
    pub fn is_unparsed(&self) -> bool {
        matches!(self, Self::Unparsed(_))
    }
}

impl<V: Variants> OneOf<V> {
    /// Resolves a union from a JSON value. Never fails.
    pub fn from_value(value: Value) -> Self {
        let mut matches = V::candidates(&value);
        if matches.len() == 1 {
            if let Some(variant) = matches.pop() {
                return Self::Variant(variant);
            }
        }

        debug!(
            union = std::any::type_name::<V>(),
            matches = matches.len(),
            "union did not resolve to a single variant; keeping raw payload"
        );
        Self::Unparsed(value)
    }
}

impl<V> From<V> for OneOf<V> {
    fn from(variant: V) -> Self {
        Self::Variant(variant)
    }
}

impl<V: Serialize> Serialize for OneOf<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Variant(v) => v.serialize(serializer),
            Self::Unparsed(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, V: Variants> Deserialize<'de> for OneOf<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
