//! Request dispatch with tracing instrumentation.
//!
//! This module provides the [`ApiClient`] through which every operation is
//! sent: it renders the endpoint's URL, attaches query, body and access
//! tokens, honours per-call [`MethodOptions`], and decodes the response with
//! the endpoint's [`ResponseFormat`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue,
};
use tracing::{Span, debug, instrument};
use url::Url;

use super::mock::MockRegistry;
use crate::auth::{EnvTokenProvider, TENANT_TOKEN_HEADER, TokenKind, TokenProvider};
use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, AuthError, ClientError, ConfigError};
use crate::options::MethodOptions;
use crate::params::ApiRequest;
use crate::response::{ApiReply, RawResponse, ResponseFormat, ResponseMeta};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const JSON_BODY: &str = "application/json; charset=utf-8";

/// Builder for configuring an [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClientBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            tokens: Arc::new(EnvTokenProvider::default()),
        }
    }

    /// Sets the client-wide request timeout.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// let client = ApiClient::builder(base_url)
    ///     .timeout(Duration::from_secs(60))
    ///     .build()?;
    /// ```
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every request.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not
    /// valid HTTP.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiError> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets where access tokens come from.
    ///
    /// Defaults to [`EnvTokenProvider`].
    pub fn token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.tokens = Arc::new(provider);
        self
    }

    /// Shares an existing token provider with this client.
    pub fn shared_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.tokens = provider;
        self
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(ApiClient {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
            tokens: self.tokens,
            mocks: MockRegistry::new(),
        })
    }
}

/// Async client shared by every Lark operation.
///
/// The client is immutable after construction apart from its
/// [`MockRegistry`], so one instance can serve concurrent calls to
/// different operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use lark_lib::{ApiClient, StaticTokenProvider};
/// use lark_lib::drive::ConvertDocxBlockReq;
///
/// let client = ApiClient::builder(Url::parse("https://open.feishu.cn")?)
///     .token_provider(StaticTokenProvider::new().tenant("t-xxx").user("u-xxx"))
///     .build()?;
///
/// let reply = client
///     .drive()
///     .convert_docx_block(&ConvertDocxBlockReq::markdown("# Title"), None)
///     .await?;
/// ```
#[derive(Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    tokens: Arc<dyn TokenProvider>,
    mocks: MockRegistry,
}

impl ApiClient {
    /// Creates a new builder for configuring an API client.
    pub fn builder(base_url: Url) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// Creates a client with default settings and environment tokens.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    /// Creates a client from a loaded [`ClientConfig`].
    pub fn from_config(
        config: ClientConfig,
        provider: impl TokenProvider + 'static,
    ) -> Result<Self, ApiError> {
        Self::builder(config.base_url)
            .timeout(config.timeout)
            .token_provider(provider)
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns this client's mock table.
    pub fn mocks(&self) -> &MockRegistry {
        &self.mocks
    }

    /// Sends one operation and decodes its response.
    ///
    /// An installed mock short-circuits everything else. Otherwise the
    /// path is rendered, query and body attached, tokens resolved, and
    /// only then is the request sent; any failure before sending leaves
    /// the network untouched.
    ///
    /// ## Errors
    ///
    /// - [`ApiError::Config`] for unresolved path parameters, bad headers or
    ///   an unserializable body.
    /// - [`ApiError::Auth`] when a required token is unavailable.
    /// - [`ApiError::Client`] for transport failures and timeouts.
    /// - [`ApiError::Domain`] when the envelope carries a non-zero code.
    /// - [`ApiError::Validation`] when the body cannot be decoded.
    #[instrument(
        name = "lark_request",
        skip_all,
        fields(
            lark.operation = %endpoint.operation(),
            http.method = %endpoint.method(),
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            lark.log_id = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn dispatch<Req, F>(
        &self,
        endpoint: &Endpoint<F>,
        request: &Req,
        options: Option<&MethodOptions>,
    ) -> Result<ApiReply<F::Output>, ApiError>
    where
        Req: ApiRequest + 'static,
        F: ResponseFormat,
    {
        let default_options = MethodOptions::default();
        let options = options.unwrap_or(&default_options);

        if let Some(mock) = self
            .mocks
            .lookup::<Req, F::Output>(endpoint.operation())?
        {
            debug!(
                "[lark] {}#{} mock enable",
                endpoint.operation().scope(),
                endpoint.operation().api()
            );
            return mock(request, options);
        }

        let url = self.request_url(endpoint, request, options)?;
        Span::current().record("http.url", url.as_str());

        let mut builder = self
            .client
            .request(endpoint.method().to_reqwest(), url)
            .header(ACCEPT, F::content_type());

        for (name, value) in self.auth_headers(endpoint, options).await? {
            builder = builder.header(name, value);
        }

        for (name, value) in options.headers() {
            let (name, value) = parse_header(name, value)?;
            builder = builder.header(name, value);
        }

        if endpoint.method().carries_body() {
            let body = serde_json::to_vec(request).map_err(ConfigError::BodySerialization)?;
            builder = builder.header(CONTENT_TYPE, JSON_BODY).body(body);
        }

        let timeout = options.timeout_override().unwrap_or(self.timeout);
        if let Some(timeout) = options.timeout_override() {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let meta = ResponseMeta::from_response(&response);
        Span::current().record("http.status_code", meta.status);
        if let Some(log_id) = &meta.log_id {
            Span::current().record("lark.log_id", log_id.as_str());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let result = F::decode(RawResponse { meta, body });
        match &result {
            Ok(_) => {
                Span::current().record("otel.status_code", "OK");
            }
            Err(e) => {
                Span::current().record("otel.status_code", "ERROR");
                debug!(error = %e, "lark request failed");
            }
        }

        result
    }

    /// Renders the full URL, query string included.
    fn request_url<Req, F>(
        &self,
        endpoint: &Endpoint<F>,
        request: &Req,
        options: &MethodOptions,
    ) -> Result<Url, ConfigError>
    where
        Req: ApiRequest,
        F: ResponseFormat,
    {
        let path = endpoint.render_path(&request.path_params())?;
        let base_url = options.base_url_override().unwrap_or(&self.base_url);
        let mut url = endpoint.full_url(base_url, &path)?;

        let query = request.query_params();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.pairs() {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Resolves the tokens the endpoint needs and places them in headers.
    ///
    /// A lone token goes into `Authorization`. When both are needed the
    /// user token takes `Authorization` and the tenant token travels in
    /// [`TENANT_TOKEN_HEADER`].
    async fn auth_headers<F: ResponseFormat>(
        &self,
        endpoint: &Endpoint<F>,
        options: &MethodOptions,
    ) -> Result<Vec<(HeaderName, HeaderValue)>, ApiError> {
        let tenant = if endpoint.needs_tenant_access_token() {
            Some(self.require_token(endpoint, TokenKind::Tenant, None).await?)
        } else {
            None
        };
        let user = if endpoint.needs_user_access_token() {
            let supplied = options.user_access_token_override();
            Some(self.require_token(endpoint, TokenKind::User, supplied).await?)
        } else {
            None
        };

        debug!(
            tenant = tenant.is_some(),
            user = user.is_some(),
            "attaching access tokens"
        );

        let mut headers = Vec::with_capacity(2);
        match (tenant, user) {
            (Some(tenant), Some(user)) => {
                headers.push((AUTHORIZATION, bearer(&user, TokenKind::User)?));
                headers.push((
                    HeaderName::from_static(TENANT_TOKEN_HEADER),
                    token_value(&tenant, TokenKind::Tenant)?,
                ));
            }
            (Some(tenant), None) => {
                headers.push((AUTHORIZATION, bearer(&tenant, TokenKind::Tenant)?));
            }
            (None, Some(user)) => {
                headers.push((AUTHORIZATION, bearer(&user, TokenKind::User)?));
            }
            (None, None) => {}
        }

        Ok(headers)
    }

    async fn require_token<F: ResponseFormat>(
        &self,
        endpoint: &Endpoint<F>,
        kind: TokenKind,
        supplied: Option<&str>,
    ) -> Result<String, AuthError> {
        let token = match supplied.filter(|t| !t.is_empty()) {
            Some(token) => Some(token.to_string()),
            None => self.tokens.token(kind).await?,
        };

        token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::MissingToken {
                kind,
                operation: endpoint.operation().to_string(),
            })
    }
}

fn bearer(token: &str, kind: TokenKind) -> Result<HeaderValue, AuthError> {
    token_value(&format!("Bearer {token}"), kind)
}

fn token_value(value: &str, kind: TokenKind) -> Result<HeaderValue, AuthError> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| AuthError::InvalidTokenFormat { kind })?;
    value.set_sensitive(true);
    Ok(value)
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let header_name =
        HeaderName::try_from(name).map_err(|e| ConfigError::invalid_header(name, e))?;
    let header_value =
        HeaderValue::try_from(value).map_err(|e| ConfigError::invalid_header(name, e))?;
    Ok((header_name, header_value))
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> ClientError {
    if error.is_timeout() {
        ClientError::Timeout {
            duration_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    } else {
        ClientError::Request(error)
    }
}
