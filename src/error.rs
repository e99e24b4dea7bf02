//! Error types for prefstore

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for prefstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for prefstore
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize settings: {0}")]
    Serialize(String),

    #[error("Failed to parse settings: {0}")]
    Parse(String),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid value for '{path}': {reason}")]
    InvalidValue { path: String, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error comes from the file system or the serializer.
    ///
    /// Callers usually treat these as "storage unavailable" for the feature
    /// that needed the setting.
    #[must_use]
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. }
                | Error::FileWrite { .. }
                | Error::DirectoryCreate { .. }
                | Error::Serialize(_)
        )
    }

    /// Check if this error was caused by a malformed key path argument
    #[must_use]
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Error::InvalidPath { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialize(e.to_string())
    }
}
