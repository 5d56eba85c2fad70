use std::fmt;
use std::str::FromStr;

use crate::error::{PricingError, Result};

/// Option flavour priced by the closed-form formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    Call,
    Put,
}

impl FromStr for OptionType {
    type Err = PricingError;

    /// Accepts "call" or "put", ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::InvalidOptionType(s.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Validated Black-Scholes-Merton inputs for a single contract.
///
/// | field      | symbol | domain          |
/// |------------|--------|-----------------|
/// | `spot`     | S      | finite, > 0     |
/// | `strike`   | K      | finite, > 0     |
/// | `expiry`   | T      | finite, > 0     |
/// | `rate`     | r      | finite          |
/// | `vol`      | sigma  | finite, > 0     |
/// | `dividend` | q      | finite          |
///
/// A negative `q` is a yield subsidy and is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingParameters {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
    dividend: f64,
}

impl PricingParameters {
    /// Validate and build a parameter set. Checks run in the order S, K, T,
    /// sigma, r, q and the first failure is reported.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        vol: f64,
        dividend: f64,
    ) -> Result<Self> {
        positive("S", spot)?;
        positive("K", strike)?;
        positive("T", expiry)?;
        positive("sigma", vol)?;
        finite("r", rate)?;
        finite("q", dividend)?;

        Ok(Self {
            spot,
            strike,
            expiry,
            rate,
            vol,
            dividend,
        })
    }

    /// Same as [`PricingParameters::new`] with `q = 0`.
    pub fn without_dividend(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        vol: f64,
    ) -> Result<Self> {
        Self::new(spot, strike, expiry, rate, vol, 0.0)
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn vol(&self) -> f64 {
        self.vol
    }

    pub fn dividend(&self) -> f64 {
        self.dividend
    }

    /// e^{-qT}
    pub fn dividend_discount(&self) -> f64 {
        (-self.dividend * self.expiry).exp()
    }

    /// e^{-rT}
    pub fn rate_discount(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Copy with a different spot, re-validated.
    pub fn with_spot(&self, spot: f64) -> Result<Self> {
        Self::new(spot, self.strike, self.expiry, self.rate, self.vol, self.dividend)
    }

    /// Copy with a different volatility, re-validated.
    pub fn with_vol(&self, vol: f64) -> Result<Self> {
        Self::new(self.spot, self.strike, self.expiry, self.rate, vol, self.dividend)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PricingParameters {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            spot: f64,
            strike: f64,
            expiry: f64,
            rate: f64,
            vol: f64,
            #[serde(default)]
            dividend: f64,
        }

        let raw = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        PricingParameters::new(raw.spot, raw.strike, raw.expiry, raw.rate, raw.vol, raw.dividend)
            .map_err(serde::de::Error::custom)
    }
}

/// The two standardized quantities of the Black-Scholes-Merton formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct D1D2 {
    pub d1: f64,
    pub d2: f64,
}

/// Put-call parity sanity check for a priced call/put pair.
///
/// `lhs = call - put`, `rhs = S e^{-qT} - K e^{-rT}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParityCheck {
    pub lhs: f64,
    pub rhs: f64,
}

impl ParityCheck {
    pub fn new(call: f64, put: f64, params: &PricingParameters) -> Self {
        Self {
            lhs: call - put,
            rhs: params.spot() * params.dividend_discount()
                - params.strike() * params.rate_discount(),
        }
    }

    pub fn diff(&self) -> f64 {
        self.lhs - self.rhs
    }

    pub fn holds_within(&self, tol: f64) -> bool {
        self.diff().abs() <= tol
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<()> {
    // NaN fails the comparison and lands here too
    if !(value > 0.0) || value.is_infinite() {
        tracing::debug!(param = name, value, "rejected pricing parameter");
        return Err(PricingError::InvalidParameter { name, value });
    }
    Ok(())
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        tracing::debug!(param = name, value, "rejected pricing parameter");
        return Err(PricingError::InvalidParameter { name, value });
    }
    Ok(())
}
