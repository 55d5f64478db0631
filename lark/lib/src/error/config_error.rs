//! Descriptor, request and client configuration errors.

use thiserror::Error;

/// Programming or configuration mistakes.
///
/// These are fatal to the call, never retried, and nothing is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A `:name` placeholder in the URL template has no value.
    #[error("Unresolved path parameter '{name}' for {operation}")]
    UnresolvedPathParam {
        /// The operation being dispatched.
        operation: String,
        /// The placeholder left without a value.
        name: String,
    },

    /// A path value would not stay a single segment once parsed.
    #[error("Invalid value '{value}' for path parameter '{name}' of {operation}")]
    InvalidPathParam {
        /// The operation being dispatched.
        operation: String,
        /// The placeholder being filled.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// The request supplied a path parameter the template does not contain.
    #[error("Unknown path parameter '{name}' for {operation}")]
    UnknownPathParam {
        /// The operation being dispatched.
        operation: String,
        /// The parameter name with no placeholder.
        name: String,
    },

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// The request body could not be serialized.
    #[error("Request body serialization failed: {0}")]
    BodySerialization(#[source] serde_json::Error),

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {message}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The installed mock does not match the operation's request or response type.
    #[error("Mock installed for {operation} has mismatched request or response types")]
    MockTypeMismatch {
        /// The mocked operation.
        operation: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ConfigError {
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_path_param_display() {
        let err = ConfigError::UnresolvedPathParam {
            operation: "Drive#CreateDocxDescendant".to_string(),
            name: "block_id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unresolved path parameter 'block_id' for Drive#CreateDocxDescendant"
        );
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err = ConfigError::InvalidUrl(url_err);
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_invalid_header_helper() {
        let err = ConfigError::invalid_header("X Bad", "contains a space");
        assert_eq!(err.to_string(), "Invalid header 'X Bad': contains a space");
    }
}
