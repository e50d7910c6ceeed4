//! Error types for folio operations

use thiserror::Error;

/// Failure of a remote fetch feeding a cache.
///
/// Must stay `Clone`: one failed fetch is handed to every caller that was
/// waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Server responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {reason}")]
    Decode { reason: String },
}

impl FetchError {
    /// Whether the server answered with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

/// Key-value persistence errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("IO error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Store {label} is unavailable")]
    Unavailable { label: String },
}

/// Theme table and selection errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Unknown theme name: {name}")]
    UnknownName { name: String },

    #[error("Invalid theme mode: {mode} (expected 'light' or 'dark')")]
    InvalidMode { mode: String },

    #[error("Duplicate theme name in table: {name}")]
    DuplicateName { name: String },

    #[error("Theme name must not be empty")]
    EmptyName,
}

/// Result type for key-value store operations.
pub type StorageResult<T> = Result<T, StorageError>;
