//! Error types for the cache library.
//!
//! The engine itself only fails at construction time. The remaining variants
//! are produced by the command layer that parses and executes text requests.

use std::io;

use thiserror::Error;

/// The main error type for cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache configuration was rejected (for example a zero capacity).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The requested key was not found in the cache, or had expired.
    #[error("key not found: '{0}'")]
    KeyNotFound(String),

    /// The command verb was not recognised.
    #[error("invalid command: '{0}'")]
    InvalidCommand(String),

    /// Failed to parse the input line or one of its arguments.
    #[error("parse error: {0}")]
    ParseError(String),

    /// An I/O error occurred (network, terminal).
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// A specialized Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = CacheError::KeyNotFound("mykey".to_string());
        assert_eq!(format!("{}", err), "key not found: 'mykey'");

        let err = CacheError::InvalidCommand("foo".to_string());
        assert_eq!(format!("{}", err), "invalid command: 'foo'");

        let err = CacheError::InvalidConfiguration("capacity must be at least 1".to_string());
        assert_eq!(
            format!("{}", err),
            "invalid configuration: capacity must be at least 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
        let cache_err: CacheError = io_err.into();
        assert!(matches!(cache_err, CacheError::IoError(_)));
        assert!(cache_err.source().is_some());
    }
}
