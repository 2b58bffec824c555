//! Error types for the RTO compliance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every error condition raised by configuration loading, attendance
//! storage, period resolution and command handling.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the RTO compliance engine.
///
/// All fallible operations in the library return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use rto_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field, dotted where nested.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No configured reporting period contains the date.
    #[error("No reporting period defined for date {date}")]
    NoPeriodDefined {
        /// The date that was looked up.
        date: NaiveDate,
    },

    /// Reading or writing an attendance file failed.
    #[error("Attendance storage error at '{path}': {message}")]
    Storage {
        /// The file or directory involved.
        path: String,
        /// A description of the I/O or encoding failure.
        message: String,
    },

    /// An attendance file contained a record that could not be interpreted.
    #[error("Invalid attendance record: {message}")]
    InvalidRecord {
        /// A description of the bad record.
        message: String,
    },

    /// User-supplied input was rejected.
    #[error("{message}")]
    InvalidInput {
        /// A description of what was wrong with the input.
        message: String,
    },

    /// A result could not be rendered as JSON.
    #[error("Failed to serialize output: {message}")]
    Serialization {
        /// The serializer's error message.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
