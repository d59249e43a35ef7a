//! HTTP response accumulator and header-line rendering.
//!
//! Application code creates one [`Response`] per outgoing response,
//! mutates it (status, headers, cookies, body), then asks for the
//! rendered header lines and body to hand back to the host environment
//! for transmission.
//!
//! # Example
//!
//! ```rust,ignore
//! use sapi_http::Response;
//!
//! let mut response = Response::new();
//! response.add_header("Content-Type", "text/html; charset=utf-8");
//! response.set_content("<h1>Hi</h1>");
//!
//! // ["HTTP/1.1 200 OK", "Content-Type: text/html; charset=utf-8"]
//! let lines = response.header_lines();
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::cookie::Cookie;
use crate::status;

/// HTTP version as a static string (no allocation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpVersion(&'static str);

impl HttpVersion {
    pub const HTTP_11: Self = Self("HTTP/1.1");

    /// Get the version string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Default for HttpVersion {
    fn default() -> Self {
        Self::HTTP_11
    }
}

/// Mutable accumulator for one outgoing response.
///
/// Headers are multi-valued and keep insertion order, per name and
/// across names. Cookies are keyed by name; re-adding a name replaces
/// the cookie but keeps its original render position.
#[derive(Debug)]
pub struct Response {
    version: HttpVersion,
    status_code: u16,
    status_text: String,
    headers: IndexMap<String, Vec<String>>,
    cookies: IndexMap<String, Cookie>,
    content: Option<String>,
}

impl Response {
    /// Create a response with status `200 OK` and no headers or body.
    pub fn new() -> Self {
        Self {
            version: HttpVersion::default(),
            status_code: 200,
            status_text: "OK".to_string(),
            headers: IndexMap::new(),
            cookies: IndexMap::new(),
            content: None,
        }
    }

    /// Set the HTTP status code.
    ///
    /// With `None` the status text falls back to the standard table
    /// (empty for unknown codes). An explicit text is used verbatim,
    /// so passing `Some("")` forces an empty reason phrase even for a
    /// known code.
    pub fn set_status_code(&mut self, status_code: u16, status_text: Option<&str>) {
        let text = match status_text {
            Some(text) => text,
            None => status::status_text(status_code).unwrap_or_default(),
        };

        self.status_code = status_code;
        self.status_text = text.to_string();
    }

    /// Get the HTTP status code.
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Get the HTTP version.
    #[inline]
    pub fn version(&self) -> HttpVersion {
        self.version
    }

    /// Add a header value, appending to any values already present for
    /// the name.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.entry(name.into()).or_default().push(value.into());
    }

    /// Set a header, replacing all values with the same name. An
    /// existing name keeps its position in the rendered output.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), vec![value.into()]);
    }

    /// Render the ordered header-line sequence: the status line, then
    /// one `name: value` line per header value, then one `Set-Cookie`
    /// line per cookie.
    pub fn header_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(1 + self.headers.len() + self.cookies.len());

        let status_line = format!("{} {} {}", self.version, self.status_code, self.status_text);
        lines.push(status_line.trim_end().to_string());

        for (name, values) in &self.headers {
            for value in values {
                lines.push(format!("{}: {}", name, value));
            }
        }

        for cookie in self.cookies.values() {
            lines.push(format!("Set-Cookie: {}", cookie.header_string()));
        }

        lines
    }

    /// Add a cookie, keyed by its name. Re-adding a name replaces the
    /// stored cookie in place.
    pub fn add_cookie(&mut self, cookie: Cookie) {
        self.cookies.insert(cookie.name().to_string(), cookie);
    }

    /// Delete a cookie by sending it back expired: its value is
    /// cleared, its max age set to `-1`, and it is re-added, so the
    /// deletion is rendered as a `Set-Cookie` line rather than omitted.
    pub fn delete_cookie(&mut self, mut cookie: Cookie) {
        cookie.set_value("");
        cookie.set_max_age(-1);
        self.add_cookie(cookie);
    }

    /// Set the body content.
    #[inline]
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    /// Get the body content.
    #[inline]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Set the headers for a redirect: a `Location` header and status
    /// `301 Moved Permanently`.
    pub fn redirect(&mut self, url: impl Into<String>) {
        self.set_header("Location", url);
        self.set_status_code(301, None);
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}
