//! Error types for core module
//!
//! Covers settings persistence and logging initialization.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// No platform configuration directory could be resolved
    #[error("No configuration directory available")]
    NoConfigDir,

    /// Log filter directive could not be parsed
    #[error("Invalid log filter {filter:?}: {message}")]
    LogFilter { filter: String, message: String },

    /// A global tracing subscriber was already installed
    #[error("Logging already initialized: {message}")]
    LoggingInit { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
