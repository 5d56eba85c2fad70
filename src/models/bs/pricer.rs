// Closed-form Black-Scholes-Merton pricing of European calls and puts on an
// underlying paying a continuous dividend yield. Implied volatility and Greeks
// are out of scope for this crate.

use super::types::{OptionType, PricingParameters, D1D2};
use crate::error::Result;
use crate::models::normal::norm_cdf;

/// d1 and d2 for a validated parameter set.
///
/// ```text
/// vsqrt = sigma * sqrt(T)
/// d1 = (ln(S / K) + (r - q + 0.5 * sigma^2) * T) / vsqrt
/// d2 = d1 - vsqrt
/// ```
pub fn compute_d1_d2(p: &PricingParameters) -> D1D2 {
    let vsqrt = p.vol() * p.expiry().sqrt();
    let d1 = ((p.spot() / p.strike()).ln()
        + (p.rate() - p.dividend() + 0.5 * p.vol() * p.vol()) * p.expiry())
        / vsqrt;
    let d2 = d1 - vsqrt;
    tracing::trace!(d1, d2, "computed d1/d2");
    D1D2 { d1, d2 }
}

/// `S e^{-qT} - K e^{-rT}`, the price of a forward struck at K.
fn forward_value(p: &PricingParameters) -> f64 {
    p.spot() * p.dividend_discount() - p.strike() * p.rate_discount()
}

/// `S e^{-qT} Φ(d1) - K e^{-rT} Φ(d2)`
///
/// If `sigma * sqrt(T)` underflows to zero, d1 is not finite and the
/// sigma -> 0 limit `max(S e^{-qT} - K e^{-rT}, 0)` is returned.
pub fn call_price(p: &PricingParameters) -> f64 {
    let D1D2 { d1, d2 } = compute_d1_d2(p);
    if !d1.is_finite() || !d2.is_finite() {
        return forward_value(p).max(0.0);
    }
    p.spot() * p.dividend_discount() * norm_cdf(d1)
        - p.strike() * p.rate_discount() * norm_cdf(d2)
}

/// `K e^{-rT} Φ(-d2) - S e^{-qT} Φ(-d1)`
///
/// Falls back to `max(K e^{-rT} - S e^{-qT}, 0)` when d1 is not finite.
pub fn put_price(p: &PricingParameters) -> f64 {
    let D1D2 { d1, d2 } = compute_d1_d2(p);
    if !d1.is_finite() || !d2.is_finite() {
        return (-forward_value(p)).max(0.0);
    }
    p.strike() * p.rate_discount() * norm_cdf(-d2)
        - p.spot() * p.dividend_discount() * norm_cdf(-d1)
}

/// Price a validated contract of the given type.
pub fn price_option(option_type: OptionType, p: &PricingParameters) -> f64 {
    match option_type {
        OptionType::Call => call_price(p),
        OptionType::Put => put_price(p),
    }
}

/// d1 and d2 from raw inputs. Fails if S, K, T or sigma is not strictly positive.
///
/// When `sigma * sqrt(T)` underflows to zero the results are infinite or NaN;
/// the pricing functions handle that case with the zero-volatility limit.
#[allow(non_snake_case)]
pub fn d1_d2(S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> Result<(f64, f64)> {
    let params = PricingParameters::new(S, K, T, r, sigma, q)?;
    let D1D2 { d1, d2 } = compute_d1_d2(&params);
    Ok((d1, d2))
}

/// Price of a European call option under Black-Scholes-Merton assumptions.
#[allow(non_snake_case)]
pub fn price_call(S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> Result<f64> {
    let params = PricingParameters::new(S, K, T, r, sigma, q)?;
    Ok(call_price(&params))
}

/// Price of a European put option under Black-Scholes-Merton assumptions.
#[allow(non_snake_case)]
pub fn price_put(S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> Result<f64> {
    let params = PricingParameters::new(S, K, T, r, sigma, q)?;
    Ok(put_price(&params))
}

/// Dispatch on a "call" / "put" string (trimmed, case-insensitive).
///
/// The option type is checked before the numeric parameters.
#[allow(non_snake_case)]
pub fn price(option_type: &str, S: f64, K: f64, T: f64, r: f64, sigma: f64, q: f64) -> Result<f64> {
    let option_type: OptionType = option_type.parse()?;
    let params = PricingParameters::new(S, K, T, r, sigma, q)?;
    Ok(price_option(option_type, &params))
}
