//! The `{code, msg, data, error}` wrapper around every JSON response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, DomainError, ValidationError};
use crate::response::{ApiReply, ResponseMeta};

/// Response envelope shared by every non-download operation.
///
/// `code == 0` signals success and `data` carries the payload. Any other
/// code is a domain error, optionally explained by `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl Envelope<serde_json::Value> {
    /// Turns a decoded envelope into the caller-facing result.
    ///
    /// A non-zero code becomes [`DomainError`] carrying the raw `data`; a
    /// zero code decodes `data` into `T`.
    pub fn into_reply<T: DeserializeOwned>(
        self,
        meta: ResponseMeta,
    ) -> Result<ApiReply<T>, ApiError> {
        let data = self.data.filter(|value| !value.is_null());

        if self.code != 0 {
            return Err(DomainError {
                code: self.code,
                msg: self.msg,
                detail: self.error,
                data,
                meta,
            }
            .into());
        }

        match data.map(serde_json::from_value::<T>).transpose() {
            Ok(data) => Ok(ApiReply { data, meta }),
            Err(e) => Err(ValidationError::json_parse(e, meta).into()),
        }
    }
}

/// Structured explanation attached to a failed envelope.
///
/// Fields the client does not model are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    /// Link to the platform's troubleshooting page for this failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub troubleshooter: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_violations: Vec<FieldViolation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_violations: Vec<PermissionViolation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub helps: Vec<Help>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    #[serde(default)]
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionViolation {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Help {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}
