//! Unified error types for chatframe.
//!
//! This module provides a single [`ChatframeError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on, with a hard line
//!   between "could not read the document" ([`ChatframeError::Load`]) and
//!   "the document is not a Messenger export" ([`ChatframeError::Schema`])
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatframe operations.
///
/// This type is broadly used across the library for any operation that
/// may produce an error.
///
/// # Example
///
/// ```rust
/// use chatframe::error::Result;
/// use chatframe::tables::ContentRow;
///
/// fn my_function() -> Result<Vec<ContentRow>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatframeError>;

/// The error type for all chatframe operations.
///
/// This enum represents all possible errors that can occur when using
/// chatframe. Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatframeError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The output directory can't be created
    /// - Permission denied
    /// - Disk is full (when writing tables)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export document could not be loaded.
    ///
    /// Covers unreadable files and malformed JSON. Contains the underlying
    /// error and optionally the file path.
    #[error("Failed to load export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Load {
        /// The underlying load error
        #[source]
        source: LoadErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document is well-formed JSON but not a Messenger export.
    ///
    /// This occurs when:
    /// - The top level is missing `participants` or `messages`
    /// - A message is missing `sender_name`, `timestamp_ms`, or `type`
    /// - A field holds a value of the wrong shape
    #[error("Invalid export: {message}")]
    Schema {
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    ///
    /// This can occur when writing tables in CSV format.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    ///
    /// This can occur when writing tables in JSON or JSONL format. Failures
    /// while reading the export are reported as [`ChatframeError::Load`] or
    /// [`ChatframeError::Schema`] instead.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when generated output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The requested output format is not available in this build.
    #[error("Output format {format} requires the '{feature}' feature to be enabled")]
    UnsupportedFormat {
        /// The format that was requested
        format: String,
        /// The cargo feature that would enable it
        feature: &'static str,
    },
}

/// Kinds of load errors that can occur.
#[derive(Debug, Error)]
pub enum LoadErrorKind {
    /// The file could not be read
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The content is not valid JSON
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatframeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatframeError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatframeError {
    /// Creates a load error from a failed file read.
    pub fn load_io(source: io::Error, path: Option<PathBuf>) -> Self {
        ChatframeError::Load {
            source: LoadErrorKind::Io(source),
            path,
        }
    }

    /// Creates a load error from a JSON syntax failure.
    pub fn load_json(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatframeError::Load {
            source: LoadErrorKind::Json(source),
            path,
        }
    }

    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        ChatframeError::Schema {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatframeError::Io(_))
    }

    /// Returns `true` if this is a load error.
    pub fn is_load(&self) -> bool {
        matches!(self, ChatframeError::Load { .. })
    }

    /// Returns `true` if this is a schema error.
    pub fn is_schema(&self) -> bool {
        matches!(self, ChatframeError::Schema { .. })
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>, feature: &'static str) -> Self {
        ChatframeError::UnsupportedFormat {
            format: format.into(),
            feature,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
