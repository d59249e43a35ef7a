//! Cookie value object and builder.
//!
//! [`Cookie`] models one outbound cookie and renders itself as the value
//! portion of a `Set-Cookie` header. [`CookieBuilder`] stamps a
//! configured set of default attributes onto newly created cookies so
//! application code produces consistent cookies without repeating the
//! domain/path/flag boilerplate.
//!
//! # Example
//!
//! ```rust,ignore
//! use sapi_http::CookieBuilder;
//!
//! let mut builder = CookieBuilder::new();
//! builder.set_default_domain("example.com");
//!
//! let cookie = builder.build("session", "abc123");
//! // "session=abc123; domain=example.com; path=/; secure; HttpOnly"
//! let header = cookie.header_string();
//! ```

use chrono::{Duration, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

/// Escape set for cookie values: everything except ASCII alphanumerics
/// and `-`, `_`, `.`, `~` (the RFC 3986 unreserved characters).
const COOKIE_VALUE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One outbound cookie: a fixed name, a mutable value, and optional
/// attributes.
///
/// Attributes are tri-state: unset, or explicitly set to a value. Only
/// attributes that were set render in the header string; a flag set to
/// `false` renders as nothing, the same as an unset one.
#[derive(Debug, Clone)]
pub struct Cookie {
    name: String,
    value: String,
    max_age: Option<i64>,
    domain: Option<String>,
    path: Option<String>,
    secure: Option<bool>,
    http_only: Option<bool>,
}

impl Cookie {
    /// Create a cookie with only a name and value set.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: None,
            domain: None,
            path: None,
            secure: None,
            http_only: None,
        }
    }

    /// Get the cookie name. The name is fixed at construction.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the cookie value.
    #[inline]
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Set the cookie max age in seconds. Negative values expire the
    /// cookie immediately.
    #[inline]
    pub fn set_max_age(&mut self, seconds: i64) {
        self.max_age = Some(seconds);
    }

    /// Set the cookie domain.
    #[inline]
    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = Some(domain.into());
    }

    /// Set the cookie path.
    #[inline]
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = Some(path.into());
    }

    /// Set the cookie secure flag.
    #[inline]
    pub fn set_secure(&mut self, secure: bool) {
        self.secure = Some(secure);
    }

    /// Set the cookie httpOnly flag.
    #[inline]
    pub fn set_http_only(&mut self, http_only: bool) {
        self.http_only = Some(http_only);
    }

    /// Render the value portion of a `Set-Cookie` header.
    ///
    /// Present parts are joined with `"; "` in a fixed order:
    /// `name=value`, `Max-Age`, `expires`, `domain`, `path`, `secure`,
    /// `HttpOnly`. The value is percent-encoded; `expires` is derived
    /// from the max age relative to the current time.
    pub fn header_string(&self) -> String {
        let mut parts = Vec::with_capacity(7);

        parts.push(format!(
            "{}={}",
            self.name,
            utf8_percent_encode(&self.value, COOKIE_VALUE_ESCAPE)
        ));

        if let Some(max_age) = self.max_age {
            parts.push(format!("Max-Age={}", max_age));
            parts.push(format!("expires={}", expires_string(max_age)));
        }

        if let Some(domain) = self.domain.as_deref() {
            if !domain.is_empty() {
                parts.push(format!("domain={}", domain));
            }
        }

        if let Some(path) = self.path.as_deref() {
            if !path.is_empty() {
                parts.push(format!("path={}", path));
            }
        }

        if self.secure == Some(true) {
            parts.push("secure".to_string());
        }

        if self.http_only == Some(true) {
            parts.push("HttpOnly".to_string());
        }

        parts.join("; ")
    }
}

/// Format the expiry timestamp for a max age, e.g.
/// `"Mon, 04-Aug-2026 12:00:00 GMT"`.
fn expires_string(max_age: i64) -> String {
    let expires = Utc::now() + Duration::seconds(max_age);
    format!("{} GMT", expires.format("%a, %d-%b-%Y %H:%M:%S"))
}

/// Default cookie attributes applied by [`CookieBuilder`].
///
/// Deserializable so hosts can load the defaults from their
/// configuration layer; unspecified fields fall back to the secure
/// defaults (`path` `/`, `secure` and `http_only` on, no domain).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CookieDefaults {
    pub domain: Option<String>,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
}

impl Default for CookieDefaults {
    fn default() -> Self {
        Self {
            domain: None,
            path: "/".to_string(),
            secure: true,
            http_only: true,
        }
    }
}

/// Factory for cookies with consistent default attributes.
///
/// Each builder owns its defaults independently; changing a default
/// affects only cookies built afterward.
#[derive(Debug, Clone, Default)]
pub struct CookieBuilder {
    defaults: CookieDefaults,
}

impl CookieBuilder {
    /// Create a builder with the standard defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder from preloaded defaults.
    pub fn with_defaults(defaults: CookieDefaults) -> Self {
        Self { defaults }
    }

    /// Set the default domain for cookies built afterward.
    pub fn set_default_domain(&mut self, domain: impl Into<String>) {
        self.defaults.domain = Some(domain.into());
    }

    /// Set the default path for cookies built afterward.
    pub fn set_default_path(&mut self, path: impl Into<String>) {
        self.defaults.path = path.into();
    }

    /// Set the default secure flag for cookies built afterward.
    pub fn set_default_secure(&mut self, secure: bool) {
        self.defaults.secure = secure;
    }

    /// Set the default httpOnly flag for cookies built afterward.
    pub fn set_default_http_only(&mut self, http_only: bool) {
        self.defaults.http_only = http_only;
    }

    /// Build a cookie with the given name and value and the configured
    /// defaults. The domain is only applied when one is configured.
    pub fn build(&self, name: impl Into<String>, value: impl Into<String>) -> Cookie {
        let mut cookie = Cookie::new(name, value);

        cookie.set_path(self.defaults.path.clone());
        cookie.set_secure(self.defaults.secure);
        cookie.set_http_only(self.defaults.http_only);

        if let Some(domain) = &self.defaults.domain {
            cookie.set_domain(domain.clone());
        }

        cookie
    }
}
