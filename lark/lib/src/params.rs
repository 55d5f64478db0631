//! Declarative routing of request fields to path, query and body.
//!
//! A request value implements [`ApiRequest`]: its path and query fields are
//! listed explicitly by [`ApiRequest::path_params`] and
//! [`ApiRequest::query_params`], and skipped by serde so that whatever is
//! left over becomes the JSON body.
//!
//! ```rust
//! use lark_lib::params::{ApiRequest, PathParams, QueryParams};
//!
//! #[derive(serde::Serialize)]
//! struct RenameDocument {
//!     #[serde(skip)]
//!     document_id: String,
//!     #[serde(skip)]
//!     client_token: Option<String>,
//!     title: String,
//! }
//!
//! impl ApiRequest for RenameDocument {
//!     fn path_params(&self) -> PathParams {
//!         PathParams::new().with("document_id", &self.document_id)
//!     }
//!
//!     fn query_params(&self) -> QueryParams {
//!         QueryParams::new().with_opt("client_token", self.client_token.as_deref())
//!     }
//! }
//! ```

use serde::Serialize;

/// A typed request value of one operation.
///
/// The `Serialize` implementation produces the JSON body and must skip every
/// field reported by `path_params` or `query_params`.
pub trait ApiRequest: Serialize + Send + Sync {
    /// Values for the `:name` placeholders of the operation's URL template.
    fn path_params(&self) -> PathParams {
        PathParams::new()
    }

    /// Query string parameters. Unset optional fields must not appear.
    fn query_params(&self) -> QueryParams {
        QueryParams::new()
    }
}

/// Placeholder values for a URL template, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(&'static str, String)>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value; a later value for the same name replaces the earlier one.
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered query string parameters.
///
/// Optional fields go through [`with_opt`](Self::with_opt), which drops
/// `None` entirely so "not provided" never turns into `key=` or `key=0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    pub fn with_opt<V: ToString>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| *n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct BatchUpdate {
        #[serde(skip)]
        document_id: String,
        #[serde(skip)]
        document_revision_id: Option<i64>,
        #[serde(skip)]
        client_token: Option<String>,
        requests: Vec<String>,
    }

    impl ApiRequest for BatchUpdate {
        fn path_params(&self) -> PathParams {
            PathParams::new().with("document_id", &self.document_id)
        }

        fn query_params(&self) -> QueryParams {
            QueryParams::new()
                .with_opt("document_revision_id", self.document_revision_id)
                .with_opt("client_token", self.client_token.as_deref())
        }
    }

    fn request(revision: Option<i64>) -> BatchUpdate {
        BatchUpdate {
            document_id: "doxcn1".to_string(),
            document_revision_id: revision,
            client_token: None,
            requests: vec!["r1".to_string()],
        }
    }

    #[test]
    fn test_unset_optional_query_fields_are_omitted() {
        let query = request(None).query_params();
        assert!(query.is_empty());
        assert!(!query.contains("document_revision_id"));
        assert!(!query.contains("client_token"));
    }

    #[test]
    fn test_zero_is_kept_when_provided() {
        let query = request(Some(0)).query_params();
        assert_eq!(query.pairs(), &[("document_revision_id", "0".to_string())]);
    }

    #[test]
    fn test_body_excludes_path_and_query_fields() {
        let body = serde_json::to_value(request(Some(-1))).unwrap();
        assert_eq!(body, serde_json::json!({ "requests": ["r1"] }));
    }

    #[test]
    fn test_path_params_replace_duplicates() {
        let params = PathParams::new().with("id", "a").with("id", "b");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("id"), Some("b"));
        assert_eq!(params.get("other"), None);
    }
}
