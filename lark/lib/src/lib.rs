//! Typed client for the Lark (Feishu) open API.
//!
//! Every operation is described by an [`Endpoint`] and sent through one
//! shared dispatcher, [`ApiClient::dispatch`], which owns URL templating,
//! query and body encoding, access-token attachment, envelope decoding and
//! binary downloads. Operation wrappers such as [`drive::DriveService`] are
//! thin callers of it.
//!
//! ## Features
//!
//! - **Declarative requests**: path, query and body fields routed by
//!   [`params::ApiRequest`]; unset optional query fields are never sent
//! - **Envelope decoding**: `{code, msg, data, error}` with domain errors
//!   that keep partial `data` and transport metadata
//! - **Downloads**: raw bodies plus the `Content-Disposition` filename
//! - **Per-call options**: [`MethodOptions`] for timeout, headers, base URL
//!   and user token
//! - **Mock overrides**: per-operation, per-client replacements for tests
//! - **Layered errors**: [`ApiError`] over client, validation, auth, config
//!   and domain failures
//!
//! ## Example
//!
//! ```rust,ignore
//! use lark_lib::{ApiClient, ClientConfig, EnvTokenProvider};
//! use lark_lib::drive::DownloadWhiteboardImageReq;
//!
//! let client = ApiClient::from_config(ClientConfig::from_env()?, EnvTokenProvider::default())?;
//! let reply = client
//!     .drive()
//!     .download_whiteboard_image(&DownloadWhiteboardImageReq::new("wb_123"), None)
//!     .await?;
//!
//! if let Some(file) = reply.data {
//!     file.write_to(&file.filename)?;
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod drive;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod method;
pub mod operation_id;
pub mod options;
pub mod params;
pub mod response;

pub use auth::{EnvTokenProvider, StaticTokenProvider, TokenKind, TokenProvider};
pub use client::{ApiClient, ApiClientBuilder, MockRegistry};
pub use config::ClientConfig;
pub use endpoint::{Endpoint, EndpointBuilder};
pub use envelope::{Envelope, ErrorDetail};
pub use error::{ApiError, AuthError, ClientError, ConfigError, DomainError, ValidationError};
pub use method::HttpMethod;
pub use operation_id::{OperationId, OperationIdError};
pub use options::MethodOptions;
pub use params::{ApiRequest, PathParams, QueryParams};
pub use response::{ApiReply, BinaryDownload, FileDownload, JsonEnvelope, ResponseFormat, ResponseMeta};
