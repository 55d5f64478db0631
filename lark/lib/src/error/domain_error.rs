//! Non-zero envelope codes.

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::ValidationError;
use crate::envelope::ErrorDetail;
use crate::response::ResponseMeta;

/// Envelope codes reporting an invalid or expired access token.
const TOKEN_ERROR_CODES: &[i64] = &[99991661, 99991663, 99991664, 99991668, 99991677];

/// The platform answered with a well-formed envelope whose `code` is not 0.
///
/// The envelope's `data` is kept as raw JSON so a partially populated
/// payload is never thrown away; decode it with
/// [`partial_data`](Self::partial_data).
#[derive(Debug, Error)]
#[error("Lark API error {code}: {msg}")]
pub struct DomainError {
    /// Machine-readable error code.
    pub code: i64,
    /// Human-readable message.
    pub msg: String,
    /// Structured detail from the envelope's `error` field.
    pub detail: Option<ErrorDetail>,
    /// The envelope's `data`, if it was not `null`.
    pub data: Option<serde_json::Value>,
    /// Transport metadata of the failed call.
    pub meta: ResponseMeta,
}

impl DomainError {
    /// Decodes the partial payload into the operation's response type.
    ///
    /// Returns `Ok(None)` when the envelope carried no data.
    pub fn partial_data<T: DeserializeOwned>(&self) -> Result<Option<T>, ValidationError> {
        self.data
            .clone()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| ValidationError::json_parse(e, self.meta.clone()))
    }

    /// Returns the platform log id, from the detail or the response headers.
    pub fn log_id(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.log_id.as_deref())
            .or(self.meta.log_id.as_deref())
    }

    /// Returns `true` if the code reports a bad or expired access token.
    pub fn is_token_error(&self) -> bool {
        TOKEN_ERROR_CODES.contains(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_error(data: Option<serde_json::Value>) -> DomainError {
        DomainError {
            code: 1254001,
            msg: "invalid param".to_string(),
            detail: None,
            data,
            meta: ResponseMeta::default(),
        }
    }

    #[test]
    fn test_display_includes_code_and_message() {
        assert_eq!(
            domain_error(None).to_string(),
            "Lark API error 1254001: invalid param"
        );
    }

    #[test]
    fn test_partial_data_is_decodable() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Partial {
            document_revision_id: i64,
        }

        let err = domain_error(Some(serde_json::json!({ "document_revision_id": 7 })));
        let partial: Option<Partial> = err.partial_data().unwrap();
        assert_eq!(partial, Some(Partial { document_revision_id: 7 }));

        let empty: Option<Partial> = domain_error(None).partial_data().unwrap();
        assert_eq!(empty, None);
    }

    #[test]
    fn test_log_id_prefers_detail() {
        let mut err = domain_error(None);
        err.meta.log_id = Some("from-header".to_string());
        assert_eq!(err.log_id(), Some("from-header"));

        err.detail = Some(ErrorDetail {
            log_id: Some("from-detail".to_string()),
            ..ErrorDetail::default()
        });
        assert_eq!(err.log_id(), Some("from-detail"));
    }

    #[test]
    fn test_recognises_token_errors() {
        let mut err = domain_error(None);
        assert!(!err.is_token_error());
        err.code = 99991663;
        assert!(err.is_token_error());
    }
}
