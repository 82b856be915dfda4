//! Error types for the share sacrifice model.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a yearly table.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the share sacrifice model.
///
/// All operations in the crate return this error type. None of the variants is
/// retried internally: a failure aborts the computation that raised it.
///
/// # Example
///
/// ```
/// use share_sacrifice::error::EngineError;
/// use rust_decimal::Decimal;
///
/// let error = EngineError::UnsupportedTier {
///     pct: Decimal::new(30, 2),
/// };
/// assert_eq!(error.to_string(), "Unsupported reduction tier: 0.30");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The reduction percentage is not one of the supported tiers.
    #[error("Unsupported reduction tier: {pct}")]
    UnsupportedTier {
        /// The rejected percentage.
        pct: Decimal,
    },

    /// The net salary lookup could not produce a usable value.
    #[error("Net salary lookup failed for gross {gross}: {message}")]
    LookupFailed {
        /// The gross monthly amount that was looked up.
        gross: Decimal,
        /// A description of the failure.
        message: String,
    },

    /// An input value was outside its accepted range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The name of the offending input.
        field: String,
        /// A description of what made the input invalid.
        message: String,
    },

    /// A month label did not match any calendar month.
    #[error("Unknown month label: {label}")]
    UnknownMonth {
        /// The label that could not be parsed.
        label: String,
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
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
