//! Access tokens and the provider seam.
//!
//! Operations declare which tokens they need; the client asks a
//! [`TokenProvider`] for them right before sending. Obtaining and refreshing
//! tokens is the provider's business: this crate ships a fixed-value
//! provider and one that reads environment variables.

use std::fmt;

use futures::future::{self, BoxFuture};

use crate::error::AuthError;

/// Environment variable read for the tenant access token by default.
pub const TENANT_TOKEN_ENV: &str = "LARK_TENANT_ACCESS_TOKEN";
/// Environment variable read for the user access token by default.
pub const USER_TOKEN_ENV: &str = "LARK_USER_ACCESS_TOKEN";

/// Header carrying the tenant token when the user token already occupies
/// `Authorization`. Lowercase, as HTTP/2 requires.
pub const TENANT_TOKEN_HEADER: &str = "x-tenant-access-token";

/// The two independent credentials an operation may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// App-level token scoped to one tenant.
    Tenant,
    /// Token acting on behalf of one user.
    User,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tenant => f.write_str("tenant access token"),
            Self::User => f.write_str("user access token"),
        }
    }
}

/// Supplies access tokens on demand.
///
/// `Ok(None)` means the provider has no token of that kind; the dispatcher
/// turns that into [`AuthError::MissingToken`] when the operation requires
/// one. The future is boxed so the client can hold `Arc<dyn TokenProvider>`.
///
/// ## Examples
///
/// ```rust
/// use futures::future::{self, BoxFuture};
/// use lark_lib::auth::{TokenKind, TokenProvider};
/// use lark_lib::AuthError;
///
/// #[derive(Debug)]
/// struct Vault;
///
/// impl TokenProvider for Vault {
///     fn token(&self, kind: TokenKind) -> BoxFuture<'_, Result<Option<String>, AuthError>> {
///         let token = match kind {
///             TokenKind::Tenant => Some("t-from-vault".to_string()),
///             TokenKind::User => None,
///         };
///         Box::pin(future::ready(Ok(token)))
///     }
/// }
/// ```
pub trait TokenProvider: Send + Sync + fmt::Debug {
    fn token(&self, kind: TokenKind) -> BoxFuture<'_, Result<Option<String>, AuthError>>;
}

/// Provider with fixed tokens.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenProvider {
    tenant: Option<String>,
    user: Option<String>,
}

impl StaticTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tenant(mut self, token: impl Into<String>) -> Self {
        self.tenant = Some(token.into());
        self
    }

    pub fn user(mut self, token: impl Into<String>) -> Self {
        self.user = Some(token.into());
        self
    }
}

impl TokenProvider for StaticTokenProvider {
    fn token(&self, kind: TokenKind) -> BoxFuture<'_, Result<Option<String>, AuthError>> {
        let token = match kind {
            TokenKind::Tenant => self.tenant.clone(),
            TokenKind::User => self.user.clone(),
        };
        Box::pin(future::ready(Ok(token)))
    }
}

/// Provider reading tokens from environment variables.
///
/// For each kind the first listed variable that is set and non-empty wins.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    tenant_vars: Vec<String>,
    user_vars: Vec<String>,
}

impl Default for EnvTokenProvider {
    fn default() -> Self {
        Self {
            tenant_vars: vec![TENANT_TOKEN_ENV.to_string()],
            user_vars: vec![USER_TOKEN_ENV.to_string()],
        }
    }
}

impl EnvTokenProvider {
    pub fn new(tenant_vars: Vec<String>, user_vars: Vec<String>) -> Self {
        Self {
            tenant_vars,
            user_vars,
        }
    }

    fn lookup(vars: &[String]) -> Option<String> {
        vars.iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
    }
}

impl TokenProvider for EnvTokenProvider {
    fn token(&self, kind: TokenKind) -> BoxFuture<'_, Result<Option<String>, AuthError>> {
        let token = match kind {
            TokenKind::Tenant => Self::lookup(&self.tenant_vars),
            TokenKind::User => Self::lookup(&self.user_vars),
        };
        Box::pin(future::ready(Ok(token)))
    }
}
