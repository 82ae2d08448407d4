//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll computation.

use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidArgument {
///     field: "gross_salary".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid argument 'gross_salary': must not be negative"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input to a calculator was out of range (e.g. a negative salary).
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The argument or field that was invalid.
        field: String,
        /// A description of what made the argument invalid.
        message: String,
    },

    /// A bracket table or contribution schedule is malformed.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// A description of the configuration problem.
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

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable, machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            EngineError::ConfigurationError { .. }
            | EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. } => "CONFIG_ERROR",
            EngineError::CalculationError { .. } => "CALCULATION_ERROR",
        }
    }

    /// Shorthand for an [`EngineError::InvalidArgument`] on a negative amount.
    pub fn negative(field: &str) -> Self {
        EngineError::InvalidArgument {
            field: field.to_string(),
            message: "must not be negative".to_string(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidArgument`] on an amount finer than a centavo.
    pub fn sub_centavo(field: &str) -> Self {
        EngineError::InvalidArgument {
            field: field.to_string(),
            message: "must be a whole number of centavos".to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
