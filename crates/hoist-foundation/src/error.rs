//! Error handling for hoist

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core error type used throughout hoist
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HoistError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest error: {message}")]
    Manifest { message: String },

    #[error("Operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Timeout occurred during: {operation}")]
    Timeout { operation: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl HoistError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new manifest error
    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest {
            message: message.into(),
        }
    }

    /// Create a new not supported error
    pub fn not_supported(operation: impl Into<String>) -> Self {
        Self::NotSupported {
            operation: operation.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Machine-readable code for reports
    pub fn code(&self) -> &'static str {
        use error_codes::*;

        match self {
            Self::Config { .. } => E1001_INVALID_CONFIG,
            Self::Io(_) => E1002_IO,
            Self::Json(_) => E1008_INVALID_DATA,
            Self::Manifest { .. } => E1003_MANIFEST,
            Self::NotSupported { .. } => E1007_NOT_SUPPORTED,
            Self::NotFound { .. } => E1006_RESOURCE_NOT_FOUND,
            Self::Timeout { .. } => E1004_TIMEOUT,
            Self::Validation { .. } => E1009_VALIDATION_FAILED,
            Self::Internal { .. } => E1000_INTERNAL,
        }
    }

    /// Input errors are recovered locally: the offending file or entry is skipped.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::NotFound { .. } | Self::Manifest { .. }
        )
    }
}

/// Result type alias for convenience
pub type HoistResult<T> = Result<T, HoistError>;

/// Standardized error codes for machine-readable reports
pub mod error_codes {
    /// Internal error
    pub const E1000_INTERNAL: &str = "E1000";
    /// Invalid configuration
    pub const E1001_INVALID_CONFIG: &str = "E1001";
    /// File system failure
    pub const E1002_IO: &str = "E1002";
    /// Project or solution manifest could not be read or patched
    pub const E1003_MANIFEST: &str = "E1003";
    /// Operation timeout
    pub const E1004_TIMEOUT: &str = "E1004";
    /// Resource not found
    pub const E1006_RESOURCE_NOT_FOUND: &str = "E1006";
    /// Operation not supported
    pub const E1007_NOT_SUPPORTED: &str = "E1007";
    /// Invalid data format
    pub const E1008_INVALID_DATA: &str = "E1008";
    /// External build validation failed
    pub const E1009_VALIDATION_FAILED: &str = "E1009";
}

/// Serializable error shape used in JSON reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&HoistError> for ErrorReport {
    fn from(err: &HoistError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}
