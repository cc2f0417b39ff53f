//! Error types for Ekman.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Ekman operations.
pub type Result<T> = std::result::Result<T, EkmanError>;

/// Errors that can occur in Ekman.
#[derive(Debug, Error)]
pub enum EkmanError {
    /// The inspection process could not be started or exited with a failure status.
    #[error("Python error: {message}")]
    CollaboratorLaunch {
        /// Captured stderr, or the launch error when nothing was captured.
        message: String,
    },

    /// The inspection process succeeded but its stdout was not JSON.
    #[error("Failed to parse Python output: {output}")]
    CollaboratorOutput {
        /// Raw stdout of the process.
        output: String,
    },

    /// The inspection script reported an error in its JSON output.
    #[error("Python error: {0}")]
    CollaboratorReported(String),

    /// The inspection process did not finish in time and was killed.
    #[error("Inspection timed out after {secs}s")]
    CollaboratorTimeout {
        /// Configured timeout in seconds.
        secs: u64,
    },

    /// The inspection was cancelled by the user.
    #[error("Inspection cancelled")]
    Cancelled,

    /// The dependency probe failed.
    #[error("Python, xarray, or netCDF4 not found. Please check your Python path and environment.")]
    DependencyMissing,

    /// A view was requested before any dataset was opened.
    #[error("No dataset loaded. Open a file first.")]
    NoSession,

    /// A named variable does not exist in the cached dataset.
    #[error("Variable not found: {name}")]
    VariableNotFound {
        /// Requested variable name.
        name: String,
    },

    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid or unreadable configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EkmanError {
    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create a CollaboratorLaunch error.
    pub fn launch(message: impl Into<String>) -> Self {
        Self::CollaboratorLaunch {
            message: message.into(),
        }
    }

    /// Create a VariableNotFound error.
    pub fn variable_not_found(name: impl Into<String>) -> Self {
        Self::VariableNotFound { name: name.into() }
    }

    /// Whether the cache is guaranteed untouched by this failure.
    ///
    /// Every inspection failure leaves the previous session in place.
    pub fn is_inspection_failure(&self) -> bool {
        matches!(
            self,
            Self::CollaboratorLaunch { .. }
                | Self::CollaboratorOutput { .. }
                | Self::CollaboratorReported(_)
                | Self::CollaboratorTimeout { .. }
                | Self::Cancelled
        )
    }
}

impl From<toml::de::Error> for EkmanError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for EkmanError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}
