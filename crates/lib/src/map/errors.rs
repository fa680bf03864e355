//! Error types for ordered map operations.
//!
//! Path resolution never fails: a missing key or a scalar in the middle of a
//! path simply resolves to nothing. The errors here cover the remaining cases,
//! where a caller hands an operation something it cannot act on.

use thiserror::Error;

use super::path::PathError;

/// Structured error types for [`OrderedMap`](super::OrderedMap) operations.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum CollectionError {
    /// A path could not be built from its keys
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// An argument was outside the domain of the operation
    #[error("Invalid argument to {operation}: {reason}")]
    InvalidArgument { operation: String, reason: String },

    /// A value had a different type than the operation requires
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Conversion from an external representation failed
    #[error("Conversion failed: {reason}")]
    Conversion { reason: String },
}

impl CollectionError {
    pub(crate) fn invalid_argument(operation: &str, reason: impl Into<String>) -> Self {
        CollectionError::InvalidArgument {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error is related to building a path
    pub fn is_path_error(&self) -> bool {
        matches!(self, CollectionError::InvalidPath { .. })
    }

    /// Check if this error is an invalid argument
    pub fn is_argument_error(&self) -> bool {
        matches!(self, CollectionError::InvalidArgument { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, CollectionError::TypeMismatch { .. })
    }

    /// Check if this error came from converting external data
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, CollectionError::Conversion { .. })
    }

    /// Get the operation name if this is an argument error
    pub fn operation(&self) -> Option<&str> {
        match self {
            CollectionError::InvalidArgument { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            CollectionError::InvalidPath { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<PathError> for CollectionError {
    fn from(err: PathError) -> Self {
        let reason = err.to_string();
        match err {
            PathError::InvalidSegment { segment, .. } => CollectionError::InvalidPath {
                path: segment,
                reason,
            },
        }
    }
}

// Conversion from CollectionError to the main Error type
impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
