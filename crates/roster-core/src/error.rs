//! Error types for Roster operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Roster crates. Uses `thiserror` for derive macros.
//!
//! Absence of a record on a read path is never an error; it is a `None` or an
//! empty collection. Only the write paths of the service façade escalate
//! absence into [`Error::NotFound`].

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Roster operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Target record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Target record lacks a required permission.
    ///
    /// Also raised when the target record does not exist at all, since an
    /// unknown record carries no permissions.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Malformed or incomplete request.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a forbidden error.
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns `true` for [`Error::Forbidden`].
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Returns `true` for [`Error::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias using Roster's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("User not found");
        assert_eq!(err.to_string(), "Not found: User not found");
        assert!(err.is_not_found());
        assert!(!err.is_forbidden());
    }

    #[test]
    fn test_forbidden_is_distinct_from_not_found() {
        let err = Error::forbidden("missing update");
        assert!(err.is_forbidden());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_with_path_mentions_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(io, "/tmp/seed.json");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/seed.json"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<u64>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
