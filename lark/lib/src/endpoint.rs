//! Endpoint descriptors with a type-state builder.
//!
//! An [`Endpoint`] is the immutable description of one open-API operation:
//! its [`OperationId`], HTTP method, URL template, which access tokens it
//! needs, and (through the `F` type parameter) how its response is decoded.
//! The [`EndpointBuilder`] refuses to build until the operation id, method
//! and path template are set.
//!
//! URL templates use `:name` placeholders occupying a whole path segment,
//! e.g. `/open-apis/board/v1/whiteboards/:whiteboard_id/nodes/plantuml`.

use std::marker::PhantomData;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::error::ConfigError;
use crate::method::HttpMethod;
use crate::operation_id::OperationId;
use crate::params::PathParams;
use crate::response::ResponseFormat;

/// Characters escaped when a value is substituted into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Marker types for builder state tracking.
pub mod builder_state {
    /// Marker for a field that has not been set.
    pub struct Missing;
    /// Marker for a field that has been set.
    pub struct Present;
}

use builder_state::{Missing, Present};

/// Descriptor of one open-API operation.
///
/// ## Type Parameters
///
/// - `F`: The [`ResponseFormat`] that decodes this operation's response.
///
/// ## Examples
///
/// ```rust
/// use lark_lib::{Endpoint, HttpMethod, OperationId};
/// use lark_lib::response::JsonEnvelope;
///
/// let endpoint: Endpoint<JsonEnvelope<serde_json::Value>> = Endpoint::builder()
///     .operation(OperationId::new("Drive", "GetDocument").unwrap())
///     .method(HttpMethod::Get)
///     .path("/open-apis/docx/v1/documents/:document_id")
///     .need_tenant_access_token(true)
///     .build();
///
/// assert_eq!(endpoint.path_params(), vec!["document_id"]);
/// ```
#[derive(Debug)]
pub struct Endpoint<F: ResponseFormat> {
    operation: OperationId,
    method: HttpMethod,
    /// URL path template, may contain `:name` placeholders.
    path: String,
    need_tenant_access_token: bool,
    need_user_access_token: bool,
    description: Option<String>,
    _format: PhantomData<fn() -> F>,
}

// Manual Clone implementation - the format marker is never cloned
impl<F: ResponseFormat> Clone for Endpoint<F> {
    fn clone(&self) -> Self {
        Self {
            operation: self.operation.clone(),
            method: self.method,
            path: self.path.clone(),
            need_tenant_access_token: self.need_tenant_access_token,
            need_user_access_token: self.need_user_access_token,
            description: self.description.clone(),
            _format: PhantomData,
        }
    }
}

impl<F: ResponseFormat> Endpoint<F> {
    /// Creates a new endpoint builder.
    pub fn builder() -> EndpointBuilder<Missing, Missing, Missing, F> {
        EndpointBuilder::new()
    }

    pub fn operation(&self) -> &OperationId {
        &self.operation
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the unsubstituted path template.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn needs_tenant_access_token(&self) -> bool {
        self.need_tenant_access_token
    }

    pub fn needs_user_access_token(&self) -> bool {
        self.need_user_access_token
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Extracts placeholder names from the template, in order of appearance.
    pub fn path_params(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Substitutes every `:name` placeholder with its value from `params`.
    ///
    /// Values are percent-encoded as path segments.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::UnresolvedPathParam`] when a placeholder has no value
    ///   (or an empty one).
    /// - [`ConfigError::InvalidPathParam`] when a value is `.` or `..`, which
    ///   URL parsing would collapse as a dot segment, escaped or not.
    /// - [`ConfigError::UnknownPathParam`] when `params` names a placeholder
    ///   the template does not contain.
    pub fn render_path(&self, params: &PathParams) -> Result<String, ConfigError> {
        let placeholders = self.path_params();
        if let Some(unknown) = params.names().find(|name| !placeholders.contains(name)) {
            return Err(ConfigError::UnknownPathParam {
                operation: self.operation.to_string(),
                name: unknown.to_string(),
            });
        }

        let mut rendered = Vec::new();
        for segment in self.path.split('/') {
            match segment.strip_prefix(':').filter(|name| !name.is_empty()) {
                Some(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| ConfigError::UnresolvedPathParam {
                            operation: self.operation.to_string(),
                            name: name.to_string(),
                        })?;
                    if value == "." || value == ".." {
                        return Err(ConfigError::InvalidPathParam {
                            operation: self.operation.to_string(),
                            name: name.to_string(),
                            value: value.to_string(),
                        });
                    }
                    rendered.push(utf8_percent_encode(value, PATH_SEGMENT).to_string());
                }
                None => rendered.push(segment.to_string()),
            }
        }

        Ok(rendered.join("/"))
    }

    /// Joins a rendered path onto `base_url`.
    ///
    /// The base URL's own path is kept, so a base of
    /// `https://proxy.example.com/lark` yields `.../lark/open-apis/...`.
    pub fn full_url(&self, base_url: &Url, rendered_path: &str) -> Result<Url, ConfigError> {
        let base = base_url.as_str().trim_end_matches('/');
        let url = Url::parse(&format!("{base}{rendered_path}"))?;
        Ok(url)
    }
}

/// Type-state builder for [`Endpoint`].
///
/// ## Type Parameters
///
/// - `Op`: State of the operation id (`Missing` or `Present`).
/// - `Method`: State of the HTTP method.
/// - `Path`: State of the URL template.
/// - `F`: The response format type.
pub struct EndpointBuilder<Op, Method, Path, F: ResponseFormat> {
    operation: Option<OperationId>,
    method: Option<HttpMethod>,
    path: Option<String>,
    need_tenant_access_token: bool,
    need_user_access_token: bool,
    description: Option<String>,
    _phantom: PhantomData<(Op, Method, Path, fn() -> F)>,
}

impl<F: ResponseFormat> EndpointBuilder<Missing, Missing, Missing, F> {
    pub fn new() -> Self {
        Self {
            operation: None,
            method: None,
            path: None,
            need_tenant_access_token: false,
            need_user_access_token: false,
            description: None,
            _phantom: PhantomData,
        }
    }
}

impl<F: ResponseFormat> Default for EndpointBuilder<Missing, Missing, Missing, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, P, F: ResponseFormat> EndpointBuilder<Missing, M, P, F> {
    pub fn operation(self, operation: OperationId) -> EndpointBuilder<Present, M, P, F> {
        EndpointBuilder {
            operation: Some(operation),
            method: self.method,
            path: self.path,
            need_tenant_access_token: self.need_tenant_access_token,
            need_user_access_token: self.need_user_access_token,
            description: self.description,
            _phantom: PhantomData,
        }
    }
}

impl<O, P, F: ResponseFormat> EndpointBuilder<O, Missing, P, F> {
    pub fn method(self, method: HttpMethod) -> EndpointBuilder<O, Present, P, F> {
        EndpointBuilder {
            operation: self.operation,
            method: Some(method),
            path: self.path,
            need_tenant_access_token: self.need_tenant_access_token,
            need_user_access_token: self.need_user_access_token,
            description: self.description,
            _phantom: PhantomData,
        }
    }
}

impl<O, M, F: ResponseFormat> EndpointBuilder<O, M, Missing, F> {
    /// Sets the URL path template (relative to the client's base URL).
    pub fn path(self, path: impl Into<String>) -> EndpointBuilder<O, M, Present, F> {
        EndpointBuilder {
            operation: self.operation,
            method: self.method,
            path: Some(path.into()),
            need_tenant_access_token: self.need_tenant_access_token,
            need_user_access_token: self.need_user_access_token,
            description: self.description,
            _phantom: PhantomData,
        }
    }
}

impl<O, M, P, F: ResponseFormat> EndpointBuilder<O, M, P, F> {
    pub fn need_tenant_access_token(self, need: bool) -> Self {
        EndpointBuilder {
            need_tenant_access_token: need,
            ..self
        }
    }

    pub fn need_user_access_token(self, need: bool) -> Self {
        EndpointBuilder {
            need_user_access_token: need,
            ..self
        }
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        EndpointBuilder {
            description: Some(description.into()),
            ..self
        }
    }
}

impl<F: ResponseFormat> EndpointBuilder<Present, Present, Present, F> {
    /// Builds the endpoint.
    ///
    /// Only available once operation, method and path have been set.
    pub fn build(self) -> Endpoint<F> {
        Endpoint {
            operation: self.operation.expect("operation set via type state"),
            method: self.method.expect("method set via type state"),
            path: self.path.expect("path set via type state"),
            need_tenant_access_token: self.need_tenant_access_token,
            need_user_access_token: self.need_user_access_token,
            description: self.description,
            _format: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::JsonEnvelope;

    fn endpoint(path: &str) -> Endpoint<JsonEnvelope<serde_json::Value>> {
        Endpoint::builder()
            .operation(OperationId::new("Drive", "Test").unwrap())
            .method(HttpMethod::Post)
            .path(path)
            .build()
    }

    #[test]
    fn test_builder_defaults_to_no_tokens() {
        let e = endpoint("/open-apis/test");
        assert_eq!(e.operation().to_string(), "Drive#Test");
        assert_eq!(e.method(), HttpMethod::Post);
        assert!(!e.needs_tenant_access_token());
        assert!(!e.needs_user_access_token());
        assert_eq!(e.description(), None);
    }

    #[test]
    fn test_builder_order_independence() {
        let e: Endpoint<JsonEnvelope<()>> = Endpoint::builder()
            .need_user_access_token(true)
            .path("/x")
            .description("desc")
            .method(HttpMethod::Get)
            .operation(OperationId::new("Drive", "X").unwrap())
            .need_tenant_access_token(true)
            .build();

        assert!(e.needs_tenant_access_token());
        assert!(e.needs_user_access_token());
        assert_eq!(e.description(), Some("desc"));
    }

    #[test]
    fn test_extracts_placeholders_in_order() {
        let e = endpoint("/open-apis/docx/v1/documents/:document_id/blocks/:block_id/descendant");
        assert_eq!(e.path_params(), vec!["document_id", "block_id"]);
        assert!(endpoint("/open-apis/docx/v1/documents/blocks/convert")
            .path_params()
            .is_empty());
    }

    #[test]
    fn test_renders_all_placeholders() {
        let e = endpoint("/open-apis/docx/v1/documents/:document_id/blocks/:block_id/descendant");
        let params = PathParams::new()
            .with("document_id", "doxcn123")
            .with("block_id", "blk456");

        let path = e.render_path(&params).unwrap();
        assert_eq!(path, "/open-apis/docx/v1/documents/doxcn123/blocks/blk456/descendant");
        assert!(!path.contains(':'));
    }

    #[test]
    fn test_escapes_segment_values() {
        let e = endpoint("/files/:name");
        let params = PathParams::new().with("name", "a b/c?d");
        assert_eq!(e.render_path(&params).unwrap(), "/files/a%20b%2Fc%3Fd");
    }

    #[test]
    fn test_missing_placeholder_is_a_config_error() {
        let e = endpoint("/documents/:document_id/blocks/:block_id");
        let params = PathParams::new().with("document_id", "doc");

        let err = e.render_path(&params).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnresolvedPathParam { ref name, .. } if name == "block_id"
        ));
    }

    #[test]
    fn test_empty_value_counts_as_unresolved() {
        let e = endpoint("/documents/:document_id");
        let params = PathParams::new().with("document_id", "");
        assert!(matches!(
            e.render_path(&params),
            Err(ConfigError::UnresolvedPathParam { .. })
        ));
    }

    #[test]
    fn test_unknown_param_is_a_config_error() {
        let e = endpoint("/documents/:document_id");
        let params = PathParams::new()
            .with("document_id", "doc")
            .with("revision", "3");
        assert!(matches!(
            e.render_path(&params),
            Err(ConfigError::UnknownPathParam { ref name, .. }) if name == "revision"
        ));
    }

    #[test]
    fn test_backslash_stays_inside_its_segment() {
        let e = endpoint("/open-apis/board/v1/whiteboards/:whiteboard_id/download_as_image");
        let params = PathParams::new().with("whiteboard_id", "a\\b");

        let path = e.render_path(&params).unwrap();
        assert_eq!(path, "/open-apis/board/v1/whiteboards/a%5Cb/download_as_image");

        let base = Url::parse("https://open.feishu.cn").unwrap();
        let url = e.full_url(&base, &path).unwrap();
        assert_eq!(url.path_segments().map(Iterator::count), Some(6));
        assert_eq!(url.path_segments().and_then(|mut s| s.nth(4)), Some("a%5Cb"));
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let e = endpoint("/open-apis/board/v1/whiteboards/:whiteboard_id/download_as_image");

        for value in [".", ".."] {
            let params = PathParams::new().with("whiteboard_id", value);
            assert!(matches!(
                e.render_path(&params),
                Err(ConfigError::InvalidPathParam { ref name, value: ref v, .. })
                    if name == "whiteboard_id" && v == value
            ));
        }
    }

    #[test]
    fn test_dots_inside_a_value_are_kept() {
        let e = endpoint("/files/:name");
        for value in ["...", "a..b", ".hidden"] {
            let params = PathParams::new().with("name", value);
            assert_eq!(e.render_path(&params).unwrap(), format!("/files/{value}"));
        }
    }

    #[test]
    fn test_full_url_keeps_base_path() {
        let e = endpoint("/open-apis/test");
        let base = Url::parse("https://proxy.example.com/lark/").unwrap();
        let url = e.full_url(&base, "/open-apis/test").unwrap();
        assert_eq!(url.as_str(), "https://proxy.example.com/lark/open-apis/test");
    }

    #[test]
    fn test_clone_keeps_descriptor() {
        let e = endpoint("/x/:id");
        let cloned = e.clone();
        assert_eq!(cloned.operation(), e.operation());
        assert_eq!(cloned.path(), e.path());
    }
}
