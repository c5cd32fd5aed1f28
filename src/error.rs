//! Error types for the paving estimator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that stop an estimate or a configuration load.
//! Per-item problems (an import or excavation line with no usable quantity)
//! are not errors: they are collected as
//! [`ValidationIssue`](crate::models::ValidationIssue)s on the result.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the paving estimator.
///
/// # Example
///
/// ```
/// use asphalt_estimator::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/labor.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/labor.yaml");
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

    /// The profit margin leaves nothing to divide by (margin of 100% or more).
    #[error("Invalid profit margin {margin_pct}%: margin must be below 100%")]
    InvalidMargin {
        /// The rejected profit margin percentage.
        margin_pct: Decimal,
    },

    /// An intermediate value left the representable decimal range.
    ///
    /// Inputs are coerced but not range-checked, so a document with absurd
    /// magnitudes fails here instead of in the arithmetic.
    #[error("Value out of range computing {quantity}")]
    Overflow {
        /// The quantity being computed when the overflow occurred.
        quantity: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
