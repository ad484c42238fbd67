//! Error types for lodestore
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Malformed persisted JSON is deliberately NOT represented here: the codec
//! recovers it locally (diagnostic warning plus the raw string), so no error
//! value ever reaches the caller for that case.

use std::io;
use thiserror::Error;

/// Result type alias for lodestore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the lodestore stack
#[derive(Debug, Error)]
pub enum Error {
    /// Default encoding was asked to persist a value with no string form.
    ///
    /// The caller must supply a per-key override encoder for this key.
    #[error("unsupported value type {type_name} for key {key:?}")]
    UnsupportedType {
        /// Key the write was addressed to
        key: String,
        /// Type name of the rejected value
        type_name: &'static str,
    },

    /// Backend rejected a write because it would exceed the configured quota
    #[error("quota exceeded: write needs {needed} bytes, limit is {limit}")]
    QuotaExceeded {
        /// Total bytes the store would hold after the write
        needed: usize,
        /// Configured byte limit
        limit: usize,
    },

    /// I/O error from a file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Persisted snapshot could not be decoded
    #[error("data corruption: {0}")]
    Corruption(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Corruption(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unsupported_type() {
        let err = Error::UnsupportedType {
            key: "session".to_string(),
            type_name: "Bytes",
        };
        let msg = err.to_string();
        assert!(msg.contains("unsupported value type"));
        assert!(msg.contains("Bytes"));
        assert!(msg.contains("session"));
    }

    #[test]
    fn test_error_display_quota_exceeded() {
        let err = Error::QuotaExceeded {
            needed: 2048,
            limit: 1024,
        };
        let msg = err.to_string();
        assert!(msg.contains("quota exceeded"));
        assert!(msg.contains("2048"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn test_error_display_corruption() {
        let err = Error::Corruption("snapshot truncated".to_string());
        let msg = err.to_string();
        assert!(msg.contains("data corruption"));
        assert!(msg.contains("snapshot truncated"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: Error = result.unwrap_err().into();
        assert!(matches!(err, Error::Corruption(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::Corruption("test".to_string()))
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::QuotaExceeded {
            needed: 10,
            limit: 5,
        };

        match err {
            Error::QuotaExceeded { needed, limit } => {
                assert_eq!(needed, 10);
                assert_eq!(limit, 5);
            }
            _ => panic!("Wrong error variant"),
        }
    }
}
