//! sapi_http - HTTP message abstraction for SAPI-style host environments.
//!
//! This crate models an inbound request, an outbound response, and
//! cookies as value objects with well-defined serialization to
//! wire-format header lines. The host environment decodes the wire
//! format into plain mappings and constructs a [`Request`]; application
//! code reads from it, mutates a [`Response`], and hands the rendered
//! header lines and body back for transmission. No transport runtime is
//! involved.
//!
//! # Features
//!
//! - **Parameter resolution**: body parameters take precedence over
//!   query parameters, with `Option`-based fallback
//! - **Hard metadata contract**: absent server meta-variables surface
//!   as errors instead of empty strings
//! - **Ordered header rendering**: multi-valued headers and cookies
//!   render in insertion order
//! - **Cookie defaults**: [`CookieBuilder`] stamps configured
//!   domain/path/flag defaults onto new cookies
//!
//! # Example
//!
//! ```rust,ignore
//! use sapi_http::{CookieBuilder, RequestBuilder, Response};
//!
//! let request = RequestBuilder::new()
//!     .query_param("page", "2")
//!     .meta("REQUEST_METHOD", "GET")
//!     .build();
//!
//! let mut response = Response::new();
//! response.add_header("Content-Type", "text/html; charset=utf-8");
//! response.add_cookie(CookieBuilder::new().build("session", "abc123"));
//! response.set_content("<h1>Hi</h1>");
//!
//! for line in response.header_lines() {
//!     // hand each line to the transport
//! }
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cookie;
pub mod error;
pub mod request;
pub mod response;
pub mod status;
pub mod upload;

// Re-exports for convenience
pub use cookie::{Cookie, CookieBuilder, CookieDefaults};
pub use error::{Error, Result};
pub use request::{Request, RequestBuilder};
pub use response::{HttpVersion, Response};
pub use upload::UploadedFile;
