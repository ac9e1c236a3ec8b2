//! Error types for the childcare cost engine.
//!
//! The calculation functions themselves never fail on validated input. Errors
//! arise at the edges: loading the reference dataset and validating the
//! schedules handed in by the input layer.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the childcare cost engine.
///
/// # Example
///
/// ```
/// use childcare_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/term_dates.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/term_dates.yaml"
/// );
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

    /// The reference dataset is internally inconsistent.
    #[error("Invalid reference data: {message}")]
    InvalidReferenceData {
        /// What is wrong with the dataset.
        message: String,
    },

    /// A schedule field is outside the range the engine accepts.
    #[error("Invalid schedule field '{field}': {message}")]
    InvalidSchedule {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A date could not be constructed or navigated to.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// A description of the date problem.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidSchedule`].
    pub fn invalid_schedule(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidSchedule {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn overlapping_terms(previous_end: NaiveDate, next_start: NaiveDate) -> Self {
        EngineError::InvalidReferenceData {
            message: format!(
                "term starting {} begins on or before the previous term's end {}",
                next_start, previous_end
            ),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
