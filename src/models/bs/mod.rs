//! Black-Scholes-Merton closed form for European options.
//!
//! [`pricer`] holds the scalar formulas and the raw-argument entry points,
//! [`batch`] the broadcasting array forms built on them.

pub mod batch;
pub mod pricer;
pub mod types;

pub use batch::{
    d1_d2_batch, price_batch, price_call_batch, price_put_batch, BatchInput, BatchParameters,
};
pub use pricer::{
    call_price, compute_d1_d2, d1_d2, price, price_call, price_option, price_put, put_price,
};
pub use types::{OptionType, ParityCheck, PricingParameters, D1D2};
