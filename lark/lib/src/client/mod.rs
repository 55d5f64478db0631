//! HTTP client module.
//!
//! [`ApiClient`] dispatches every operation; [`MockRegistry`] lets tests
//! replace individual operations on one client.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use lark_lib::{ApiClient, MethodOptions, StaticTokenProvider};
//! use lark_lib::drive::{endpoints, DownloadWhiteboardImageReq};
//! use url::Url;
//!
//! let client = ApiClient::builder(Url::parse("https://open.feishu.cn")?)
//!     .token_provider(StaticTokenProvider::new().tenant("t-xxx").user("u-xxx"))
//!     .build()?;
//!
//! let request = DownloadWhiteboardImageReq::new("wb_123");
//! let reply = client
//!     .dispatch(&endpoints::DOWNLOAD_WHITEBOARD_IMAGE, &request, None)
//!     .await?;
//! ```

mod executor;
mod mock;

pub use executor::{ApiClient, ApiClientBuilder, DEFAULT_TIMEOUT_SECS};
pub use mock::{MockFn, MockRegistry};
