//! Error types returned by the pricing core.
//!
//! Every failure here is an input error surfaced synchronously to the caller.
//! There is nothing transient to retry and no partial result is ever returned.

use thiserror::Error;

/// Errors produced while validating inputs or pricing options.
///
/// # Examples
/// ```
/// use bsm_lib::PricingError;
///
/// let err = PricingError::InvalidParameter { name: "S", value: 0.0 };
/// assert_eq!(err.to_string(), "S must be > 0, got 0");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A model parameter is outside its domain (S, K, T, sigma must be
    /// finite and strictly positive; r and q must be finite).
    #[error("{name} must be {}, got {value}", domain_of(.name))]
    InvalidParameter { name: &'static str, value: f64 },

    /// The option type string was neither "call" nor "put".
    #[error("option type must be 'call' or 'put', got '{0}'")]
    InvalidOptionType(String),

    /// Batched inputs whose shapes cannot be broadcast together.
    #[error("cannot broadcast shape {found:?} against {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// A grid axis cannot produce any valid points.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

fn domain_of(name: &str) -> &'static str {
    match name {
        "r" | "q" => "finite",
        _ => "> 0",
    }
}

/// Result alias used throughout the pricing core.
pub type Result<T> = std::result::Result<T, PricingError>;
