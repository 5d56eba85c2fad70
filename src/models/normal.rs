//! Standard normal cumulative distribution function.
//!
//! Φ(x) = 0.5 * (1 + erf(x / sqrt(2))) is evaluated through the complementary
//! error function as `0.5 * erfc(-x / sqrt(2))`. The two forms are identical
//! algebraically; the `erfc` form keeps full relative precision in the lower
//! tail where `1 + erf(..)` would cancel. `libm::erfc` is accurate to a few
//! ULP over the whole real line, so the absolute error of Φ stays below 1e-15.

use ndarray::{Array, ArrayBase, Data, Dimension};
use std::f64::consts::FRAC_1_SQRT_2;

/// Φ(x) for a single point.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
}

/// Φ applied elementwise, returning an array of the same shape.
///
/// Each element is evaluated with [`norm_cdf`], so batched and scalar results
/// agree bit for bit.
pub fn norm_cdf_batch<S, D>(xs: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    xs.mapv(norm_cdf)
}
