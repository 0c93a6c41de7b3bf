//! Error types for the Mix Bonus Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that abort a whole operation. Malformed numbers and
//! unknown team tags are recovered locally and never surface here.

use thiserror::Error;

/// The main error type for the Mix Bonus Engine.
///
/// # Example
///
/// ```
/// use mix_bonus_engine::error::EngineError;
///
/// let error = EngineError::ReportNotFound {
///     path: "/missing/relatorio.txt".to_string(),
/// };
/// assert_eq!(error.to_string(), "Report file not found: /missing/relatorio.txt");
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

    /// Configuration could not be written back to disk.
    #[error("Failed to write configuration file '{path}': {message}")]
    ConfigWriteError {
        /// The destination path.
        path: String,
        /// A description of the write error.
        message: String,
    },

    /// The report file is missing or could not be read.
    #[error("Report file not found: {path}")]
    ReportNotFound {
        /// The path that could not be read.
        path: String,
    },

    /// The report was parsed but contained no employees.
    #[error("Report is empty or invalid: no employees found")]
    EmptyReport,

    /// No employee with the given code exists in the report.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee code that was looked up.
        id: String,
    },

    /// The summary document could not be written.
    #[error("Failed to write summary '{path}': {message}")]
    SummaryWriteError {
        /// The destination path.
        path: String,
        /// A description of the write error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
