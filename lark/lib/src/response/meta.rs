//! Transport metadata and the successful reply shape.

use reqwest::header::HeaderMap;

/// Response header carrying the platform's log id.
pub const LOG_ID_HEADER: &str = "x-tt-logid";
/// Response header carrying the gateway request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// What the transport saw, independent of the decoded payload.
#[derive(Debug, Clone, Default)]
pub struct ResponseMeta {
    /// HTTP status code; `0` when no network call happened (mocks).
    pub status: u16,
    pub headers: HeaderMap,
    /// Platform log id, quoted when reporting problems upstream.
    pub log_id: Option<String>,
    pub request_id: Option<String>,
}

impl ResponseMeta {
    /// Captures status and headers from a live response.
    pub fn from_response(response: &reqwest::Response) -> Self {
        let headers = response.headers().clone();
        let header_str = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        Self {
            status: response.status().as_u16(),
            log_id: header_str(LOG_ID_HEADER),
            request_id: header_str(REQUEST_ID_HEADER),
            headers,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns a header value as text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A successful call: the decoded payload (if the envelope had one) and the
/// transport metadata.
#[derive(Debug, Clone)]
pub struct ApiReply<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

impl<T> ApiReply<T> {
    pub fn new(data: Option<T>, meta: ResponseMeta) -> Self {
        Self { data, meta }
    }

    /// A reply with no transport behind it, for mocks and tests.
    pub fn detached(data: T) -> Self {
        Self::new(Some(data), ResponseMeta::default())
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiReply<U> {
        ApiReply {
            data: self.data.map(f),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_meta_is_not_success() {
        let meta = ResponseMeta::default();
        assert_eq!(meta.status, 0);
        assert!(!meta.is_success());
        assert_eq!(meta.header(LOG_ID_HEADER), None);
    }

    #[test]
    fn test_detached_reply_has_data() {
        let reply = ApiReply::detached(5).map(|n| n * 2);
        assert_eq!(reply.data(), Some(&10));
        assert_eq!(reply.into_data(), Some(10));
    }
}
