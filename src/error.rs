//! Error types for the budget planner.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a planning input,
//! loading defaults, or running the legacy allocator.
//!
//! Allocation itself never fails: shortfalls are reported as audit warnings
//! on the plan, not as errors.

use thiserror::Error;

/// The main error type for the budget planner.
///
/// # Example
///
/// ```
/// use budget_planner::error::EngineError;
///
/// let error = EngineError::InvalidAmount {
///     value: "12.x".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid amount: '12.x' is not a decimal number");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A monetary amount could not be parsed as a decimal.
    #[error("Invalid amount: '{value}' is not a decimal number")]
    InvalidAmount {
        /// The source text that failed to parse.
        value: String,
    },

    /// A planning input could not be coerced into the expected shape.
    #[error("Validation error: {message}")]
    ValidationError {
        /// A description of what failed validation.
        message: String,
    },

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

    /// Category percentages do not add up to 100.
    #[error("Category percentages must total 100, got {total}")]
    InvalidPercentTotal {
        /// The actual sum of the percentages.
        total: u64,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
