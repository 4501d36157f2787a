//! Unified error types for rmfpack.
//!
//! This module provides a single [`RmfError`] enum that covers all error
//! cases in the library.
//!
//! # What is *not* an error
//!
//! The report scanner itself never fails. Malformed timestamps fall back to
//! their display form, unparseable percentages and incomplete service-class
//! blocks are skipped silently. Only the layers around the scanner (reading
//! files, parsing user-supplied filter dates, writing output) produce
//! [`RmfError`] values, and per-file read failures are collected into
//! [`ParseStats`](crate::core::aggregate::ParseStats) rather than returned.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for rmfpack operations.
///
/// # Example
///
/// ```rust
/// use rmfpack::error::Result;
/// use rmfpack::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, RmfError>;

/// The error type for all rmfpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RmfError {
    /// An I/O error without file context (typically while writing output).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A report file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file that was being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A report file is not valid UTF-8 and strict decoding was requested.
    #[error("Failed to decode {} as UTF-8: {source}", path.display())]
    Decode {
        /// The file that was being decoded
        path: PathBuf,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid date in a filter bound.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Unsupported or misconfigured format (output format, config file).
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// The file discovery pattern is not a valid glob.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 error while converting generated output to a string.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for RmfError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        RmfError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl RmfError {
    /// Creates a read error for the given path.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RmfError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a decode error for the given path.
    pub fn decode(path: impl Into<PathBuf>, source: std::string::FromUtf8Error) -> Self {
        RmfError::Decode {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        RmfError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        RmfError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS[.fff]][Z]",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, RmfError::Io(_) | RmfError::Read { .. })
    }

    /// Returns `true` if this error happened while loading a report file.
    pub fn is_file_load(&self) -> bool {
        matches!(self, RmfError::Read { .. } | RmfError::Decode { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, RmfError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, RmfError::InvalidDate { .. })
    }
}
