//! Top-level API error type.

use super::{AuthError, ClientError, ConfigError, DomainError, ValidationError};
use crate::response::ResponseMeta;
use thiserror::Error;

/// Top-level error type for every dispatched operation.
///
/// ## Examples
///
/// ```rust,ignore
/// use lark_lib::ApiError;
///
/// match client.drive().convert_docx_block(&request, None).await {
///     Ok(reply) => println!("{:?}", reply.data),
///     Err(ApiError::Domain(e)) => eprintln!("rejected ({}): {}", e.code, e.msg),
///     Err(ApiError::Client(e)) if e.is_retryable() => eprintln!("try again: {e}"),
///     Err(e) => eprintln!("failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport errors (network, timeout, unreadable status).
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Malformed envelopes or bodies.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing or unusable access tokens.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Descriptor, request or client configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Non-zero envelope code.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// Returns the transport metadata whenever a response was received.
    pub fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Domain(e) => Some(&e.meta),
            Self::Validation(e) => Some(e.meta()),
            Self::Client(e) => e.meta(),
            Self::Auth(_) | Self::Config(_) => None,
        }
    }

    /// Returns the envelope code of a domain error.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Domain(e) => Some(e.code),
            _ => None,
        }
    }

    /// Returns `true` for errors raised before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenKind;

    #[test]
    fn test_from_client_error() {
        let api_err: ApiError = ClientError::Timeout { duration_ms: 5000 }.into();
        assert!(matches!(api_err, ApiError::Client(_)));
        assert!(!api_err.is_local());
        assert_eq!(api_err.code(), None);
    }

    #[test]
    fn test_auth_errors_are_local() {
        let api_err: ApiError = AuthError::MissingToken {
            kind: TokenKind::User,
            operation: "Drive#X".to_string(),
        }
        .into();
        assert!(api_err.is_local());
        assert!(api_err.meta().is_none());
    }

    #[test]
    fn test_domain_error_exposes_code_and_meta() {
        let api_err: ApiError = DomainError {
            code: 1770002,
            msg: "not found".to_string(),
            detail: None,
            data: None,
            meta: ResponseMeta {
                status: 404,
                ..ResponseMeta::default()
            },
        }
        .into();

        assert_eq!(api_err.code(), Some(1770002));
        assert_eq!(api_err.meta().map(|m| m.status), Some(404));
        assert_eq!(api_err.to_string(), "Lark API error 1770002: not found");
    }
}
