//! Response decoding errors.

use thiserror::Error;

use crate::response::ResponseMeta;

/// The response could not be decoded.
///
/// No partial data is guaranteed when one of these is returned, but the
/// transport metadata of the response is.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The envelope or its `data` payload is not the expected JSON.
    #[error("JSON parse error: {source}")]
    JsonParse {
        #[source]
        source: serde_json::Error,
        /// Transport metadata of the response.
        meta: Box<ResponseMeta>,
    },

    /// The response content type doesn't match the operation's decode mode.
    #[error("Unexpected content type: expected {expected}, got {actual}")]
    ContentTypeMismatch {
        /// The expected content type.
        expected: String,
        /// The content type received.
        actual: String,
        /// Transport metadata of the response.
        meta: Box<ResponseMeta>,
    },
}

impl ValidationError {
    pub fn json_parse(source: serde_json::Error, meta: ResponseMeta) -> Self {
        Self::JsonParse {
            source,
            meta: Box::new(meta),
        }
    }

    pub fn is_format_mismatch(&self) -> bool {
        matches!(self, Self::ContentTypeMismatch { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::JsonParse { .. })
    }

    /// Returns the metadata of the response that failed to decode.
    pub fn meta(&self) -> &ResponseMeta {
        match self {
            Self::JsonParse { meta, .. } | Self::ContentTypeMismatch { meta, .. } => meta.as_ref(),
        }
    }
}
