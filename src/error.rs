//! Error types for request metadata access.

use std::fmt;

/// Errors surfaced by [`Request`](crate::Request) metadata accessors.
///
/// A missing meta-variable is a contract violation by the host
/// environment and is never recovered from inside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required server meta-variable was not supplied by the host.
    MissingMetaVariable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingMetaVariable(key) => {
                write!(f, "request meta-variable {} was not set", key)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for metadata accessors.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingMetaVariable("REQUEST_URI".to_string());
        assert_eq!(err.to_string(), "request meta-variable REQUEST_URI was not set");
    }

    #[test]
    fn test_error_carries_key() {
        let err = Error::MissingMetaVariable("HTTPS".to_string());
        let Error::MissingMetaVariable(key) = err;
        assert_eq!(key, "HTTPS");
    }
}
