//! Response handling.
//!
//! Every operation's [`Endpoint`](crate::Endpoint) names a
//! [`ResponseFormat`] that turns the raw HTTP response into an
//! [`ApiReply`]: [`JsonEnvelope`] for the `{code, msg, data, error}`
//! envelope and [`BinaryDownload`] for file downloads.

mod download;
mod format;
mod meta;

pub use download::{FileDownload, filename_from_content_disposition};
pub use format::{BinaryDownload, JsonEnvelope, RawResponse, ResponseFormat};
pub use meta::{ApiReply, ResponseMeta};
