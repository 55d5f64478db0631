//! Per-call overrides for a single dispatch.

use std::time::Duration;

use url::Url;

/// Overrides applied to one call only; the client is never mutated.
///
/// Options compose with [`merge`](Self::merge): for every setting the
/// later value wins, and extra headers are merged by case-insensitive name.
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use lark_lib::MethodOptions;
///
/// let defaults = MethodOptions::new().timeout(Duration::from_secs(10));
/// let call = MethodOptions::new()
///     .header("X-Request-Source", "sync-job")
///     .user_access_token("u-abc");
///
/// let merged = defaults.merge(call);
/// assert_eq!(merged.timeout_override(), Some(Duration::from_secs(10)));
/// assert_eq!(merged.user_access_token_override(), Some("u-abc"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodOptions {
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
    base_url: Option<Url>,
    user_access_token: Option<String>,
}

impl MethodOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the client-wide request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds an extra header; replaces an earlier header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Sends this call to a different base URL.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Supplies the user access token for this call instead of asking the
    /// token provider.
    pub fn user_access_token(mut self, token: impl Into<String>) -> Self {
        self.user_access_token = Some(token.into());
        self
    }

    /// Merges `later` over `self`.
    pub fn merge(self, later: MethodOptions) -> MethodOptions {
        let mut merged = MethodOptions {
            timeout: later.timeout.or(self.timeout),
            headers: self.headers,
            base_url: later.base_url.or(self.base_url),
            user_access_token: later.user_access_token.or(self.user_access_token),
        };
        for (name, value) in later.headers {
            merged = merged.header(name, value);
        }
        merged
    }

    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn base_url_override(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn user_access_token_override(&self) -> Option<&str> {
        self.user_access_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_options_win() {
        let first = MethodOptions::new()
            .timeout(Duration::from_secs(5))
            .user_access_token("u-first");
        let second = MethodOptions::new().timeout(Duration::from_secs(60));

        let merged = first.merge(second);
        assert_eq!(merged.timeout_override(), Some(Duration::from_secs(60)));
        assert_eq!(merged.user_access_token_override(), Some("u-first"));
    }

    #[test]
    fn test_headers_merge_case_insensitively() {
        let first = MethodOptions::new()
            .header("X-Trace", "one")
            .header("X-Keep", "kept");
        let second = MethodOptions::new().header("x-trace", "two");

        let merged = first.merge(second);
        assert_eq!(
            merged.headers(),
            &[
                ("X-Keep".to_string(), "kept".to_string()),
                ("x-trace".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_base_url_override_is_optional() {
        assert!(MethodOptions::new().base_url_override().is_none());

        let url = Url::parse("https://open.larksuite.com").unwrap();
        let opts = MethodOptions::new().base_url(url.clone());
        assert_eq!(opts.base_url_override(), Some(&url));
    }
}
