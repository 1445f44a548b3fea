//! Custom error types for shmstore.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.

use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error;

use crate::types::SegmentKey;

/// Top-level error type for the shared memory store.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Store Errors - Fail-Fast, No Retry
    // =========================================================================
    /// The segment behind an identifier could not be created or attached.
    /// Every failure of the underlying primitive collapses into this variant.
    #[error("Error initializing shared memory for '{identifier}' (key {key}): {reason}")]
    Initialization {
        identifier: String,
        key: SegmentKey,
        reason: String,
    },

    /// The segment reported a different byte count than the padded payload.
    #[error("Error writing data for '{identifier}': wrote {written} of {expected} bytes")]
    DataIntegrity {
        identifier: String,
        expected: usize,
        written: usize,
    },

    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Wrap a segment failure as an initialization error for `identifier`.
    pub(crate) fn initialization(identifier: &str, key: SegmentKey, source: SegmentError) -> Self {
        Self::Initialization {
            identifier: identifier.to_string(),
            key,
            reason: source.to_string(),
        }
    }
}

/// Hard validation errors reject a configuration before any segment is opened.
#[derive(Debug, Error)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Segment capacity out of bounds: {capacity} bytes (min: {min}, max: {max})")]
    CapacityOutOfBounds {
        capacity: usize,
        min: usize,
        max: usize,
    },
}

/// Failures of the System V shared memory calls behind a segment handle.
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("shmget failed for key {key} ({size} bytes): {errno}")]
    Get {
        key: SegmentKey,
        size: usize,
        errno: Errno,
    },

    #[error("shmat failed for key {key}: {errno}")]
    Attach { key: SegmentKey, errno: Errno },

    #[error("shmctl(IPC_STAT) failed for key {key}: {errno}")]
    Stat { key: SegmentKey, errno: Errno },

    #[error("Segment for key {key} is {actual} bytes, expected {expected}")]
    SizeMismatch {
        key: SegmentKey,
        expected: usize,
        actual: usize,
    },

    #[error("shmctl(IPC_RMID) failed for key {key}: {errno}")]
    Destroy { key: SegmentKey, errno: Errno },

    #[error("Offset {offset} is outside segment of {size} bytes")]
    OutOfBounds { offset: usize, size: usize },
}

/// Result type alias using StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_validation_error_display() {
        let err = HardValidationError::CapacityOutOfBounds {
            capacity: 0,
            min: 1,
            max: 1024,
        };
        assert!(err.to_string().contains("0 bytes"));
        assert!(err.to_string().contains("max: 1024"));
    }

    #[test]
    fn test_error_chain() {
        let validation_err = HardValidationError::InvalidFieldValue {
            field: "capacity",
            value: "abc".to_string(),
            reason: "not a number".to_string(),
        };
        let store_err: StoreError = validation_err.into();
        assert!(matches!(store_err, StoreError::HardValidation(_)));
    }

    #[test]
    fn test_segment_error_becomes_initialization() {
        let key = SegmentKey::from_identifier("session-42");
        let err = StoreError::initialization(
            "session-42",
            key,
            SegmentError::Get {
                key,
                size: 256,
                errno: Errno::EACCES,
            },
        );

        match &err {
            StoreError::Initialization {
                identifier, reason, ..
            } => {
                assert_eq!(identifier, "session-42");
                assert!(reason.contains("shmget"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("session-42"));
    }
}
