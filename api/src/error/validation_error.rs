//! Payload decoding and validation errors.

use thiserror::Error;

/// Errors while encoding a request body or decoding a response.
///
/// Shape mismatches on optional fields do not surface here: they degrade the
/// record to [`Decoded::Unparsed`](crate::model::Decoded::Unparsed). Absent
/// or malformed required fields and non-object payloads are errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Request body serialization failed.
    #[error("JSON encode error: {0}")]
    JsonEncode(serde_json::Error),

    /// A field the model declares required was absent (or null).
    #[error("required field {field} missing")]
    MissingRequiredField {
        /// The JSON name of the missing field.
        field: &'static str,
    },

    /// A required field was present but not of the JSON type the model
    /// declares for it.
    #[error("required field {field} is malformed: {message}")]
    InvalidRequiredField {
        /// The JSON name of the malformed field.
        field: &'static str,
        message: String,
    },

    /// A model was decoded from something other than a JSON object.
    #[error("expected a JSON object, found {found}")]
    ExpectedObject {
        /// The JSON type that was found instead.
        found: &'static str,
    },

    /// Empty response body when content was expected.
    #[error("Empty response body")]
    EmptyBody,
}

impl ValidationError {
    /// Returns `true` if this is a parsing error.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse(_))
    }

    /// Returns `true` if the payload violated a model's required fields or
    /// top-level shape.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField { .. }
                | Self::InvalidRequiredField { .. }
                | Self::ExpectedObject { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_parse_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = ValidationError::JsonParse(json_err);
        assert!(err.is_parse_error());
        assert!(!err.is_schema_violation());
    }

    #[test]
    fn test_missing_required_field_names_field() {
        let err = ValidationError::MissingRequiredField { field: "title" };
        assert_eq!(err.to_string(), "required field title missing");
        assert!(err.is_schema_violation());
    }

    #[test]
    fn test_malformed_required_field_names_field() {
        let err = ValidationError::InvalidRequiredField {
            field: "name",
            message: "invalid type: integer `7`, expected a string".to_string(),
        };
        assert!(err.to_string().starts_with("required field name is malformed"));
        assert!(err.is_schema_violation());
    }
}
