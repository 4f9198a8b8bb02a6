//! Unified error types for chatlens.
//!
//! [`ChatlensError`] covers every failure in the library. Scanner-level
//! problems (unknown tags, a misfiring header heuristic, an empty sender) are
//! never errors: the scanner is tolerant by construction. The only hard
//! failure while parsing a document is a timestamp that matches neither
//! accepted pattern, and that error carries enough context (which document,
//! which message, which string) for a batch caller to report it.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Conversation;
///
/// fn my_function() -> Result<Conversation> {
///     Ok(Conversation::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// A timestamp string that matched neither the primary pattern nor the
/// pattern with its trailing three characters removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized timestamp '{input}'")]
pub struct TimestampError {
    /// The raw text as it appeared in the document.
    pub input: String,
}

impl TimestampError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The messages directory doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing the cache or output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A timestamp could not be parsed outside of a document context.
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    /// A message inside a document could not be constructed.
    ///
    /// `index` is the position the message would have taken in the
    /// conversation (0 is the first message in document order).
    #[error("Failed to build message #{index}: {source}")]
    Message {
        /// Index of the message that failed.
        index: usize,
        /// The underlying timestamp error.
        #[source]
        source: TimestampError,
    },

    /// A whole document failed to parse.
    ///
    /// Wraps the inner error with the document's path so batch callers can
    /// report which file was at fault.
    #[error("Failed to parse {}: {source}", path.display())]
    Document {
        /// Path of the document.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<ChatlensError>,
    },

    /// JSON serialization error (cache store, JSON output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input or output does not have the expected shape.
    #[error("Invalid {what}: {message}")]
    InvalidFormat {
        /// What was being interpreted
        what: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A requested conversation document does not exist.
    #[error("Conversation not found: {}", path.display())]
    NotFound {
        /// The path that was looked up
        path: PathBuf,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a message construction error.
    pub fn message(index: usize, source: TimestampError) -> Self {
        ChatlensError::Message { index, source }
    }

    /// Wraps an error with the document it came from.
    pub fn document(path: impl Into<PathBuf>, source: ChatlensError) -> Self {
        ChatlensError::Document {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(what: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            what,
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ChatlensError::NotFound { path: path.into() }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this error comes from an unparseable timestamp,
    /// at any level of wrapping.
    pub fn is_timestamp(&self) -> bool {
        match self {
            ChatlensError::Timestamp(_) | ChatlensError::Message { .. } => true,
            ChatlensError::Document { source, .. } => source.is_timestamp(),
            _ => false,
        }
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatlensError::NotFound { .. })
    }

    /// Index of the failing message, if the error is tied to one.
    pub fn message_index(&self) -> Option<usize> {
        match self {
            ChatlensError::Message { index, .. } => Some(*index),
            ChatlensError::Document { source, .. } => source.message_index(),
            _ => None,
        }
    }

    /// The malformed timestamp string, if the error is tied to one.
    pub fn timestamp_input(&self) -> Option<&str> {
        match self {
            ChatlensError::Timestamp(e) | ChatlensError::Message { source: e, .. } => {
                Some(&e.input)
            }
            ChatlensError::Document { source, .. } => source.timestamp_input(),
            _ => None,
        }
    }
}
