//! HTTP methods used by open-API operations.

use strum::{Display, EnumIter, EnumString};

/// HTTP method of an open-API operation.
///
/// The platform only exposes the five verbs below; anything else is
/// rejected when a descriptor is parsed from a string.
///
/// ## Examples
///
/// ```rust
/// use lark_lib::HttpMethod;
///
/// let method: HttpMethod = "PATCH".parse().unwrap();
/// assert_eq!(method, HttpMethod::Patch);
/// assert!(method.carries_body());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read a resource.
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl HttpMethod {
    /// Returns `true` when requests with this method send a JSON body.
    ///
    /// Non-path, non-query fields of a request value are only serialized
    /// for POST, PUT and PATCH.
    pub fn carries_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
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

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        method.to_reqwest()
    }
}
