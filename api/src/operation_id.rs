use std::fmt;

/// A validated operation identifier such as `v2.ListIncidents`.
/// Rules:
/// 1. A version prefix: `v` followed by one or more digits.
/// 2. A single `.` separator.
/// 3. A name starting with an uppercase ASCII letter, then ASCII alphanumerics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationId(String);

#[derive(Debug, PartialEq, Eq)]
pub enum OperationIdError {
    Empty,
    MissingVersion,
    InvalidName,
    InvalidCharacter(char),
}

impl fmt::Display for OperationIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "OperationId cannot be empty"),
            Self::MissingVersion => write!(f, "OperationId must start with a version such as 'v2.'"),
            Self::InvalidName => write!(f, "OperationId name must start with an uppercase letter"),
            Self::InvalidCharacter(c) => write!(f, "OperationId contains invalid character: '{}'", c),
        }
    }
}

impl std::error::Error for OperationIdError {}

impl OperationId {
    /// Creates a new OperationId from any type that can turn into a String.
    pub fn new<S: Into<String>>(id: S) -> Result<Self, OperationIdError> {
        let s = id.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), OperationIdError> {
        if s.is_empty() {
            return Err(OperationIdError::Empty);
        }

        let Some((version, name)) = s.split_once('.') else {
            return Err(OperationIdError::MissingVersion);
        };

        let digits = version.strip_prefix('v').ok_or(OperationIdError::MissingVersion)?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(OperationIdError::MissingVersion);
        }

        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_uppercase() => {}
            _ => return Err(OperationIdError::InvalidName),
        }

        for c in chars {
            if !c.is_ascii_alphanumeric() {
                return Err(OperationIdError::InvalidCharacter(c));
            }
        }

        Ok(())
    }

    /// Returns a string slice reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The API version prefix, e.g. `v2`.
    pub fn version(&self) -> &str {
        self.0.split_once('.').map(|(v, _)| v).unwrap_or_default()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<OperationId> for String {
    fn from(id: OperationId) -> Self {
        id.0
    }
}

impl TryFrom<String> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OperationId {
    type Error = OperationIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_creation() {
        assert!(OperationId::new("v2.ListEvents").is_ok());
        assert!(OperationId::new("v1.GetIncident2").is_ok());
        assert!(OperationId::new(String::from("v10.X")).is_ok());
    }

    #[test]
    fn test_missing_version() {
        assert_eq!(OperationId::new("ListEvents"), Err(OperationIdError::MissingVersion));
        assert_eq!(OperationId::new("x2.ListEvents"), Err(OperationIdError::MissingVersion));
        assert_eq!(OperationId::new("v.ListEvents"), Err(OperationIdError::MissingVersion));
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(OperationId::new("v2.listEvents"), Err(OperationIdError::InvalidName));
        assert_eq!(OperationId::new("v2."), Err(OperationIdError::InvalidName));
        assert!(matches!(
            OperationId::new("v2.List-Events"),
            Err(OperationIdError::InvalidCharacter('-'))
        ));
    }

    #[test]
    fn test_empty() {
        assert_eq!(OperationId::new(""), Err(OperationIdError::Empty));
    }

    #[test]
    fn test_traits() {
        let id: OperationId = "v2.SearchEvents".try_into().unwrap();
        assert_eq!(id.version(), "v2");
        assert_eq!(id.to_string(), "v2.SearchEvents");

        let s: String = id.into();
        assert_eq!(s, "v2.SearchEvents");
    }
}
