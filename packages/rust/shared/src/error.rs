//! Error types for stima.
//!
//! Library crates use [`StimaError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all stima operations.
#[derive(Debug, thiserror::Error)]
pub enum StimaError {
    /// The target document does not exist.
    #[error("file '{}' does not exist", .path.display())]
    InputNotFound { path: PathBuf },

    /// The target document exists but could not be read as UTF-8 text.
    #[error("error reading {path:?}: {source}")]
    InputUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No `**Stima ore**` line could be attributed to a phase heading.
    #[error("no phases found in '{}'; ensure the format is correct", .path.display())]
    NoPhasesExtracted { path: PathBuf },

    /// Writing the rendered summary to a file failed.
    #[error("error writing {path:?}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No clipboard helper could take the summary.
    #[error("could not copy to clipboard: {hint}")]
    ClipboardUnavailable { hint: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Invalid caller-supplied input (e.g. zero weekly hours).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, StimaError>;

impl StimaError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a read failure with the document path.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Wrap a write failure with the destination path.
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite {
            path: path.into(),
            source,
        }
    }
}
