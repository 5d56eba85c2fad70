//! # bsm-lib: Closed-Form European Option Pricing
//!
//! `bsm-lib` prices European calls and puts under the Black-Scholes-Merton model
//! with a continuous dividend yield. It is a small, pure and re-entrant core meant
//! to sit behind an interactive front end that collects the six model inputs and
//! renders prices as metrics or as a spot/volatility heatmap.
//!
//! ## Core Features
//!
//! - **Normal CDF**: a single high-precision Φ built on `erfc`, scalar and batched
//! - **Pricer**: validated d1/d2 and discounted call/put prices
//! - **Batches**: NumPy-style broadcasting over n-dimensional parameter arrays
//! - **Grids**: spot x volatility price meshes with CSV export and TOML configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_lib::{price, price_call, price_put, ParityCheck, PricingParameters};
//!
//! let call = price_call(100.0, 100.0, 1.0, 0.05, 0.2, 0.02)?;
//! let put = price_put(100.0, 100.0, 1.0, 0.05, 0.2, 0.02)?;
//! assert_eq!(price(" Call ", 100.0, 100.0, 1.0, 0.05, 0.2, 0.02)?, call);
//!
//! let params = PricingParameters::new(100.0, 100.0, 1.0, 0.05, 0.2, 0.02)?;
//! assert!(ParityCheck::new(call, put, &params).holds_within(1e-7));
//! # Ok::<(), bsm_lib::PricingError>(())
//! ```
//!
//! ## Model
//!
//! ```text
//! d1 = (ln(S/K) + (r - q + sigma^2/2) T) / (sigma sqrt(T))
//! d2 = d1 - sigma sqrt(T)
//! C  = S e^{-qT} Φ(d1)  - K e^{-rT} Φ(d2)
//! P  = K e^{-rT} Φ(-d2) - S e^{-qT} Φ(-d1)
//! ```
//!
//! S, K, T and sigma must be strictly positive; r and q are any finite reals.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod grid;
pub mod models;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{PricingError, Result};

// Normal distribution
pub use models::normal::{norm_cdf, norm_cdf_batch};

// Scalar and batched pricing
pub use models::bs::{
    call_price, compute_d1_d2, d1_d2, d1_d2_batch, price, price_batch, price_call,
    price_call_batch, price_option, price_put, price_put_batch, put_price, BatchInput,
    BatchParameters, OptionType, ParityCheck, PricingParameters, D1D2,
};

// Grids
pub use grid::{price_grid, AxisSpec, GridCell, GridConfig, PriceGrid};

// ================================================================================================
// DEFAULT GRIDS
// ================================================================================================

/// Pre-configured spot x volatility grids.
///
/// All presets share the base contract S = K = 100, T = 1, r = 5%, q = 0,
/// sigma = 20%.
///
/// - [`standard()`]: 21 x 21, spot 50..150, vol 5%..80%
/// - [`fine()`]: 101 x 76 over the same ranges
/// - [`coarse()`]: 5 x 5, spot 80..120, vol 10%..50%
pub mod default_grids {
    use crate::grid::config::GridConfig;

    /// Heatmap-sized grid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bsm_lib::{default_grids, price_grid};
    ///
    /// let grid = price_grid(&default_grids::standard())?;
    /// assert_eq!(grid.shape(), (21, 21));
    /// # Ok::<(), bsm_lib::PricingError>(())
    /// ```
    pub fn standard() -> GridConfig {
        GridConfig::standard()
    }

    /// Dense grid for smooth rendering.
    pub fn fine() -> GridConfig {
        GridConfig::fine()
    }

    /// Small grid for sanity checks and tests.
    pub fn coarse() -> GridConfig {
        GridConfig::coarse()
    }
}

/// Price a call/put pair for the same contract and check put-call parity.
///
/// Returns `(call, put, parity)`.
///
/// ```rust
/// use bsm_lib::{price_pair, PricingParameters};
///
/// let params = PricingParameters::without_dividend(100.0, 100.0, 1.0, 0.05, 0.2)?;
/// let (call, put, parity) = price_pair(&params);
/// assert!(call > put);
/// assert!(parity.diff().abs() < 1e-10);
/// # Ok::<(), bsm_lib::PricingError>(())
/// ```
pub fn price_pair(params: &PricingParameters) -> (f64, f64, ParityCheck) {
    let call = call_price(params);
    let put = put_price(params);
    (call, put, ParityCheck::new(call, put, params))
}
