//! Decode modes.
//!
//! The [`ResponseFormat`] trait defines how a raw HTTP response becomes an
//! [`ApiReply`]. An endpoint picks its format through its type parameter,
//! so the choice between envelope decoding and raw download is made per
//! operation at compile time.

use std::marker::PhantomData;

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use super::download::{FileDownload, filename_from_content_disposition};
use super::meta::{ApiReply, ResponseMeta};
use crate::envelope::Envelope;
use crate::error::{ApiError, ClientError, ValidationError};

/// A response whose body has been read but not interpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub meta: ResponseMeta,
    pub body: bytes::Bytes,
}

impl RawResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.meta.header(CONTENT_TYPE.as_str())
    }

    /// Returns `true` when the server labelled the body as JSON.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
    }

    fn into_status_error(self) -> ClientError {
        let message = String::from_utf8_lossy(&self.body).into_owned();
        ClientError::http_status(message, self.meta)
    }
}

/// Strategy for decoding one operation's responses.
pub trait ResponseFormat: Send + Sync + 'static {
    /// The payload type handed to the caller.
    type Output: Send + Sync + 'static;

    /// Decodes a raw response.
    fn decode(raw: RawResponse) -> Result<ApiReply<Self::Output>, ApiError>;

    /// The content type this format expects, sent as `Accept`.
    fn content_type() -> &'static str;
}

/// The `{code, msg, data, error}` envelope with a typed `data`.
///
/// The envelope is decoded whatever the HTTP status, since the platform
/// reports most failures through it. A body that is not an envelope is a
/// [`ClientError::HttpStatus`] on a non-2xx status and a
/// [`ValidationError::JsonParse`] otherwise.
#[derive(Debug, Clone, Copy)]
pub struct JsonEnvelope<T>(PhantomData<fn() -> T>);

impl<T: DeserializeOwned + Send + Sync + 'static> ResponseFormat for JsonEnvelope<T> {
    type Output = T;

    fn decode(raw: RawResponse) -> Result<ApiReply<T>, ApiError> {
        let envelope: Envelope<serde_json::Value> = match serde_json::from_slice(&raw.body) {
            Ok(envelope) => envelope,
            Err(_) if !raw.meta.is_success() => return Err(raw.into_status_error().into()),
            Err(e) => return Err(ValidationError::json_parse(e, raw.meta).into()),
        };

        if envelope.code == 0 && !raw.meta.is_success() {
            return Err(raw.into_status_error().into());
        }

        envelope.into_reply(raw.meta)
    }

    fn content_type() -> &'static str {
        "application/json"
    }
}

/// Raw file download.
///
/// The body is handed over untouched, together with the filename from
/// `Content-Disposition`. A JSON body on this path is the platform's error
/// answer and is decoded as an envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryDownload;

impl ResponseFormat for BinaryDownload {
    type Output = FileDownload;

    fn decode(raw: RawResponse) -> Result<ApiReply<FileDownload>, ApiError> {
        if raw.is_json() {
            let actual = raw.content_type().unwrap_or_default().to_string();
            // A non-zero code returns the domain error here.
            let reply = JsonEnvelope::<serde_json::Value>::decode(raw)?;
            return Err(ValidationError::ContentTypeMismatch {
                expected: "a file body".to_string(),
                actual,
                meta: Box::new(reply.meta),
            }
            .into());
        }

        if !raw.meta.is_success() {
            return Err(raw.into_status_error().into());
        }

        let filename = raw
            .meta
            .header(CONTENT_DISPOSITION.as_str())
            .and_then(filename_from_content_disposition)
            .unwrap_or_default();
        let content_type = raw.content_type().map(str::to_string);

        let file = FileDownload {
            filename,
            content_type,
            content: raw.body,
        };
        Ok(ApiReply::new(Some(file), raw.meta))
    }

    /// Downloads carry the file's own type (`image/png` for whiteboards).
    fn content_type() -> &'static str {
        "*/*"
    }
}
