//! HTTP verbs used by operation definitions.

use strum::{Display, EnumString};

/// The HTTP verb of an operation.
///
/// Displays and parses as the uppercase verb.
///
/// ```rust
/// use api::RestMethod;
///
/// assert_eq!(RestMethod::Patch.to_string(), "PATCH");
/// assert_eq!("PUT".parse::<RestMethod>().unwrap(), RestMethod::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    /// Creates a resource, or runs a search with a JSON query body.
    Post,
    /// Replaces a whole resource.
    Put,
    /// Changes only the attributes present in the body.
    Patch,
    Delete,
}

impl RestMethod {
    /// Returns `true` for verbs that never change server state.
    pub fn is_read_only(self) -> bool {
        matches!(self, Self::Get)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}
