//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Expiry on or before the valuation date.
    #[error("Expiry {expiry} must be after the valuation date {valuation}")]
    ExpiryNotAfterValuation {
        /// Expiry date.
        expiry: String,
        /// Valuation date.
        valuation: String,
    },
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
