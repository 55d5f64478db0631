//! HTTP transport errors.

use thiserror::Error;

use crate::response::ResponseMeta;

/// Errors from the HTTP transport.
///
/// These are surfaced to the caller unchanged; the dispatcher never retries.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed at the network or protocol level.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status and no readable envelope.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The response body, as text.
        message: String,
        /// Transport metadata of the response.
        meta: Box<ResponseMeta>,
    },

    /// The call exceeded its timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The effective timeout in milliseconds.
        duration_ms: u64,
    },
}

impl ClientError {
    /// Returns `true` if a caller-side retry could succeed.
    ///
    /// Informational only: nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
        }
    }

    /// Builds a status error from a response that carried no usable envelope.
    pub fn http_status(message: impl Into<String>, meta: ResponseMeta) -> Self {
        Self::HttpStatus {
            status: meta.status,
            message: message.into(),
            meta: Box::new(meta),
        }
    }

    /// Returns the transport metadata when a response was received.
    pub fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::HttpStatus { meta, .. } => Some(meta.as_ref()),
            Self::Request(_) | Self::Timeout { .. } => None,
        }
    }

    /// Returns the HTTP status code if one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Timeout { .. } => None,
        }
    }
}
