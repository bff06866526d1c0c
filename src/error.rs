//! Error types for veld-config

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for veld-config
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Settings Errors
    // -------------------------------------------------------------------------
    #[error("Setting not found: {0}")]
    SettingNotFound(String),

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("Setting '{0}' is not a nested scope")]
    NotAScope(String),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Duplicate setting: {0}")]
    DuplicateSetting(String),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("Scope is finalized and can no longer be modified")]
    Finalized,

    // -------------------------------------------------------------------------
    // Dynamic Dispatch Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Operation '{op}' expects {expected} argument(s), got {actual}")]
    InvalidArity {
        op: String,
        expected: usize,
        actual: usize,
    },
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SettingNotFound(_))
    }

    /// Check if this error came from the dynamic dispatch layer
    #[must_use]
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedOperation(_) | Error::InvalidArity { .. }
        )
    }
}
