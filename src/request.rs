//! HTTP request abstraction for application code.
//!
//! The host environment decodes the wire format (query string, form
//! body, cookie header, multipart uploads) into plain string mappings
//! and constructs one [`Request`] per incoming request; application code
//! only reads from it. All accessors are pure functions of the state
//! supplied at construction.
//!
//! # Example
//!
//! ```rust,ignore
//! use sapi_http::RequestBuilder;
//!
//! let request = RequestBuilder::new()
//!     .query_param("page", "2")
//!     .meta(sapi_http::request::meta_keys::REQUEST_METHOD, "GET")
//!     .build();
//!
//! assert_eq!(request.parameter("page"), Some("2"));
//! assert_eq!(request.method().unwrap(), "GET");
//! ```

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::upload::UploadedFile;

/// Server meta-variable key names, as populated by SAPI-style hosts.
pub mod meta_keys {
    pub const REQUEST_URI: &str = "REQUEST_URI";
    pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
    pub const QUERY_STRING: &str = "QUERY_STRING";
    pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
    pub const HTTP_ACCEPT: &str = "HTTP_ACCEPT";
    pub const HTTP_REFERER: &str = "HTTP_REFERER";
    pub const HTTP_USER_AGENT: &str = "HTTP_USER_AGENT";
    pub const HTTPS: &str = "HTTPS";
}

/// Read-only view over one decoded incoming request.
///
/// Parameter accessors return `Option` and never fail; callers chain
/// `.unwrap_or(default)` where a fallback value is wanted. The
/// meta-variable accessors ([`uri`](Request::uri),
/// [`method`](Request::method), ...) are the exception: an absent key
/// there means the host did not populate the transport metadata it is
/// required to supply, and they fail with
/// [`Error::MissingMetaVariable`].
#[derive(Debug)]
pub struct Request {
    query_params: HashMap<String, String>,
    body_params: HashMap<String, String>,
    cookies: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
    server_meta: HashMap<String, String>,
    raw_body: String,
}

impl Request {
    /// Create a request from already-decoded mappings.
    pub fn new(
        query_params: HashMap<String, String>,
        body_params: HashMap<String, String>,
        cookies: HashMap<String, String>,
        files: HashMap<String, UploadedFile>,
        server_meta: HashMap<String, String>,
        raw_body: impl Into<String>,
    ) -> Self {
        Self {
            query_params,
            body_params,
            cookies,
            files,
            server_meta,
            raw_body: raw_body.into(),
        }
    }

    /// Create a request builder.
    #[inline]
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// Get a parameter value. Body parameters take precedence over
    /// query parameters.
    #[inline]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.body_params
            .get(key)
            .or_else(|| self.query_params.get(key))
            .map(String::as_str)
    }

    /// Get a query parameter value.
    #[inline]
    pub fn query_parameter(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Get a body parameter value.
    #[inline]
    pub fn body_parameter(&self, key: &str) -> Option<&str> {
        self.body_params.get(key).map(String::as_str)
    }

    /// Get a cookie value.
    #[inline]
    pub fn cookie(&self, key: &str) -> Option<&str> {
        self.cookies.get(key).map(String::as_str)
    }

    /// Get an uploaded file descriptor.
    #[inline]
    pub fn file(&self, key: &str) -> Option<&UploadedFile> {
        self.files.get(key)
    }

    /// Get all parameters, query overlaid by body (body wins on key
    /// collision, matching [`parameter`](Request::parameter)).
    pub fn parameters(&self) -> HashMap<&str, &str> {
        let mut merged: HashMap<&str, &str> =
            HashMap::with_capacity(self.query_params.len() + self.body_params.len());

        for (key, value) in &self.query_params {
            merged.insert(key, value);
        }
        for (key, value) in &self.body_params {
            merged.insert(key, value);
        }

        merged
    }

    /// Get all query parameters.
    #[inline]
    pub fn query_parameters(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Get all body parameters.
    #[inline]
    pub fn body_parameters(&self) -> &HashMap<String, String> {
        &self.body_params
    }

    /// Get all cookies.
    #[inline]
    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    /// Get all uploaded file descriptors.
    #[inline]
    pub fn files(&self) -> &HashMap<String, UploadedFile> {
        &self.files
    }

    /// Get the raw request body.
    #[inline]
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }

    /// The URI which was given in order to access this page.
    #[inline]
    pub fn uri(&self) -> Result<&str> {
        self.meta(meta_keys::REQUEST_URI)
    }

    /// The URI path, without any query suffix.
    pub fn path(&self) -> Result<&str> {
        let uri = self.uri()?;
        let path = match uri.find('?') {
            Some(pos) => &uri[..pos],
            None => uri,
        };
        Ok(path)
    }

    /// The request method used to access the page, e.g. `GET`, `POST`.
    #[inline]
    pub fn method(&self) -> Result<&str> {
        self.meta(meta_keys::REQUEST_METHOD)
    }

    /// Contents of the `Accept` header from the current request.
    #[inline]
    pub fn http_accept(&self) -> Result<&str> {
        self.meta(meta_keys::HTTP_ACCEPT)
    }

    /// The address of the page which referred the user agent here.
    #[inline]
    pub fn referer(&self) -> Result<&str> {
        self.meta(meta_keys::HTTP_REFERER)
    }

    /// Contents of the `User-Agent` header from the request.
    #[inline]
    pub fn user_agent(&self) -> Result<&str> {
        self.meta(meta_keys::HTTP_USER_AGENT)
    }

    /// The IP address from which the user is viewing the current page.
    #[inline]
    pub fn ip_address(&self) -> Result<&str> {
        self.meta(meta_keys::REMOTE_ADDR)
    }

    /// The query string, if any, via which the page was accessed.
    #[inline]
    pub fn query_string(&self) -> Result<&str> {
        self.meta(meta_keys::QUERY_STRING)
    }

    /// Whether the current request arrived over HTTPS.
    ///
    /// Unlike the other meta-variable accessors this never fails: an
    /// absent `HTTPS` key simply means a plaintext request.
    #[inline]
    pub fn is_secure(&self) -> bool {
        self.server_meta
            .get(meta_keys::HTTPS)
            .map(|value| value != "off")
            .unwrap_or(false)
    }

    fn meta(&self, key: &'static str) -> Result<&str> {
        match self.server_meta.get(key) {
            Some(value) => Ok(value),
            None => {
                tracing::warn!(key, "request meta-variable not supplied by host");
                Err(Error::MissingMetaVariable(key.to_string()))
            }
        }
    }
}

/// Builder for assembling a [`Request`] entry by entry.
///
/// Hosts that already hold the decoded maps can call
/// [`Request::new`] directly; the builder suits incremental
/// construction and tests.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    query_params: HashMap<String, String>,
    body_params: HashMap<String, String>,
    cookies: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
    server_meta: HashMap<String, String>,
    raw_body: String,
}

impl RequestBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Add query parameters in bulk, e.g. from a host's decoded
    /// parameter list.
    pub fn query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in params {
            self.query_params
                .insert(key.as_ref().to_string(), value.as_ref().to_string());
        }
        self
    }

    /// Add a body parameter.
    pub fn body_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.body_params.insert(key.into(), value.into());
        self
    }

    /// Add body parameters in bulk.
    pub fn body_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in params {
            self.body_params
                .insert(key.as_ref().to_string(), value.as_ref().to_string());
        }
        self
    }

    /// Add a cookie.
    pub fn cookie(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(key.into(), value.into());
        self
    }

    /// Add cookies in bulk.
    pub fn cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in cookies {
            self.cookies
                .insert(key.as_ref().to_string(), value.as_ref().to_string());
        }
        self
    }

    /// Add an uploaded file descriptor.
    pub fn file(mut self, key: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(key.into(), file);
        self
    }

    /// Add a server meta-variable.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.server_meta.insert(key.into(), value.into());
        self
    }

    /// Add server meta-variables in bulk.
    pub fn metas<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            self.server_meta
                .insert(key.as_ref().to_string(), value.as_ref().to_string());
        }
        self
    }

    /// Set the raw request body.
    pub fn raw_body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = body.into();
        self
    }

    /// Build the request.
    pub fn build(self) -> Request {
        Request {
            query_params: self.query_params,
            body_params: self.body_params,
            cookies: self.cookies,
            files: self.files,
            server_meta: self.server_meta,
            raw_body: self.raw_body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_params() -> Request {
        Request::builder()
            .query_param("shared", "from-query")
            .query_param("page", "2")
            .body_param("shared", "from-body")
            .body_param("title", "hello")
            .build()
    }

    #[test]
    fn test_parameter_body_precedence() {
        let request = request_with_params();

        assert_eq!(request.parameter("shared"), Some("from-body"));
        assert_eq!(request.parameter("page"), Some("2"));
        assert_eq!(request.parameter("title"), Some("hello"));
        assert_eq!(request.parameter("missing"), None);
        assert_eq!(request.parameter("missing").unwrap_or("fallback"), "fallback");
    }

    #[test]
    fn test_single_mapping_accessors() {
        let request = request_with_params();

        assert_eq!(request.query_parameter("shared"), Some("from-query"));
        assert_eq!(request.query_parameter("title"), None);
        assert_eq!(request.body_parameter("shared"), Some("from-body"));
        assert_eq!(request.body_parameter("page"), None);
    }

    #[test]
    fn test_merged_parameters() {
        let request = request_with_params();
        let merged = request.parameters();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged["shared"], "from-body");
        assert_eq!(merged["page"], "2");
        assert_eq!(merged["title"], "hello");
    }

    #[test]
    fn test_cookie_lookup() {
        let request = Request::builder().cookie("session", "abc123").build();

        assert_eq!(request.cookie("session"), Some("abc123"));
        assert_eq!(request.cookie("missing"), None);
        assert_eq!(request.cookies().len(), 1);
    }

    #[test]
    fn test_file_lookup() {
        let upload = UploadedFile::new("cat.png", "image/png", "/tmp/php1a2b", 512);
        let request = Request::builder().file("avatar", upload.clone()).build();

        assert_eq!(request.file("avatar"), Some(&upload));
        assert_eq!(request.file("missing"), None);
        assert_eq!(request.files().len(), 1);
    }

    #[test]
    fn test_raw_body() {
        let request = Request::builder().raw_body("a=1&b=2").build();
        assert_eq!(request.raw_body(), "a=1&b=2");

        let empty = Request::builder().build();
        assert_eq!(empty.raw_body(), "");
    }

    #[test]
    fn test_meta_accessors() {
        let request = Request::builder()
            .metas([
                (meta_keys::REQUEST_METHOD, "POST"),
                (meta_keys::REQUEST_URI, "/articles?page=2"),
                (meta_keys::QUERY_STRING, "page=2"),
                (meta_keys::REMOTE_ADDR, "203.0.113.7"),
                (meta_keys::HTTP_ACCEPT, "text/html"),
                (meta_keys::HTTP_REFERER, "https://example.com/"),
                (meta_keys::HTTP_USER_AGENT, "test/1.0"),
            ])
            .build();

        assert_eq!(request.method().unwrap(), "POST");
        assert_eq!(request.uri().unwrap(), "/articles?page=2");
        assert_eq!(request.query_string().unwrap(), "page=2");
        assert_eq!(request.ip_address().unwrap(), "203.0.113.7");
        assert_eq!(request.http_accept().unwrap(), "text/html");
        assert_eq!(request.referer().unwrap(), "https://example.com/");
        assert_eq!(request.user_agent().unwrap(), "test/1.0");
    }

    #[test]
    fn test_missing_meta_is_an_error() {
        let request = Request::builder().build();

        let err = request.method().unwrap_err();
        assert_eq!(err, Error::MissingMetaVariable("REQUEST_METHOD".to_string()));
        assert!(err.to_string().contains("REQUEST_METHOD"));

        assert!(request.uri().is_err());
        assert!(request.query_string().is_err());
    }

    #[test]
    fn test_path_strips_query_suffix() {
        let request = Request::builder()
            .meta(meta_keys::REQUEST_URI, "/articles?page=2&sort=asc")
            .build();
        assert_eq!(request.path().unwrap(), "/articles");

        let plain = Request::builder()
            .meta(meta_keys::REQUEST_URI, "/articles")
            .build();
        assert_eq!(plain.path().unwrap(), "/articles");
    }

    #[test]
    fn test_path_requires_uri() {
        let request = Request::builder().build();
        assert_eq!(
            request.path().unwrap_err(),
            Error::MissingMetaVariable("REQUEST_URI".to_string())
        );
    }

    #[test]
    fn test_is_secure() {
        let absent = Request::builder().build();
        assert!(!absent.is_secure());

        let off = Request::builder().meta(meta_keys::HTTPS, "off").build();
        assert!(!off.is_secure());

        let on = Request::builder().meta(meta_keys::HTTPS, "on").build();
        assert!(on.is_secure());

        let one = Request::builder().meta(meta_keys::HTTPS, "1").build();
        assert!(one.is_secure());
    }

    #[test]
    fn test_builder_bulk_setters() {
        let request = Request::builder()
            .query_params([("a", "1"), ("b", "2")])
            .body_params([("b", "3")])
            .cookies([("session", "abc")])
            .build();

        assert_eq!(request.query_parameter("a"), Some("1"));
        assert_eq!(request.parameter("b"), Some("3"));
        assert_eq!(request.cookie("session"), Some("abc"));
    }

    #[test]
    fn test_new_from_maps() {
        let mut query = HashMap::new();
        query.insert("q".to_string(), "rust".to_string());
        let mut meta = HashMap::new();
        meta.insert("REQUEST_METHOD".to_string(), "GET".to_string());

        let request = Request::new(
            query,
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            meta,
            "",
        );

        assert_eq!(request.query_parameter("q"), Some("rust"));
        assert_eq!(request.method().unwrap(), "GET");
    }
}
