//! Access token errors.

use thiserror::Error;

use crate::auth::TokenKind;

/// A required access token could not be attached.
///
/// All of these are raised before anything is sent.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The operation requires a token that nobody supplied.
    #[error("Missing {kind} for {operation}")]
    MissingToken {
        /// Which token is missing.
        kind: TokenKind,
        /// The operation that required it.
        operation: String,
    },

    /// The token cannot be used as an HTTP header value.
    #[error("Invalid {kind} format")]
    InvalidTokenFormat {
        /// Which token was rejected.
        kind: TokenKind,
    },

    /// The token provider failed to produce a token.
    #[error("Token provider failed for {kind}: {message}")]
    Provider {
        /// Which token was requested.
        kind: TokenKind,
        /// The provider's explanation.
        message: String,
    },
}

impl AuthError {
    /// Returns the kind of token this error is about.
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::MissingToken { kind, .. }
            | Self::InvalidTokenFormat { kind }
            | Self::Provider { kind, .. } => *kind,
        }
    }

    /// Returns `true` if asking the provider again might help.
    pub fn is_refreshable(&self) -> bool {
        matches!(self, Self::Provider { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_display() {
        let err = AuthError::MissingToken {
            kind: TokenKind::Tenant,
            operation: "Drive#ConvertDocxBlock".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing tenant access token for Drive#ConvertDocxBlock"
        );
        assert_eq!(err.kind(), TokenKind::Tenant);
        assert!(!err.is_refreshable());
    }

    #[test]
    fn test_provider_failure_is_refreshable() {
        let err = AuthError::Provider {
            kind: TokenKind::User,
            message: "refresh endpoint unavailable".to_string(),
        };
        assert!(err.is_refreshable());
        assert_eq!(err.kind(), TokenKind::User);
    }
}
