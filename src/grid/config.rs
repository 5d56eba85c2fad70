#[cfg(feature = "serde")]
use anyhow::{Context, Result};
#[cfg(feature = "serde")]
use std::path::Path;

use crate::error::PricingError;
use crate::models::bs::PricingParameters;

/// Evenly spaced axis of a price grid, endpoints included.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisSpec {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl AxisSpec {
    pub fn new(min: f64, max: f64, steps: usize) -> Self {
        Self { min, max, steps }
    }

    /// Grid points from `min` to `max`. A single step yields `[min]`.
    ///
    /// Both bounds must be finite and strictly positive (the axes carry spot
    /// and volatility) and `min <= max`.
    pub fn values(&self) -> Result<Vec<f64>, PricingError> {
        if self.steps == 0 {
            return Err(PricingError::InvalidGrid("axis needs at least one step".into()));
        }
        if !(self.min > 0.0) || !self.max.is_finite() {
            return Err(PricingError::InvalidGrid(format!(
                "axis bounds must be finite and > 0, got [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(PricingError::InvalidGrid(format!(
                "axis min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.steps == 1 {
            return Ok(vec![self.min]);
        }

        let last = self.steps - 1;
        let width = self.max - self.min;
        Ok((0..self.steps)
            .map(|i| {
                if i == last {
                    self.max
                } else {
                    self.min + width * i as f64 / last as f64
                }
            })
            .collect())
    }
}

/// Base contract plus the spot and volatility axes of a price grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_spot"))]
    pub spot: f64,

    #[cfg_attr(feature = "serde", serde(default = "default_strike"))]
    pub strike: f64,

    /// Years to expiry
    #[cfg_attr(feature = "serde", serde(default = "default_expiry"))]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[cfg_attr(feature = "serde", serde(default = "default_rate"))]
    pub rate: f64,

    #[cfg_attr(feature = "serde", serde(default = "default_vol"))]
    pub vol: f64,

    /// Continuous dividend yield
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend: f64,

    /// Rows of the grid
    #[cfg_attr(feature = "serde", serde(default = "default_spot_axis"))]
    pub spot_axis: AxisSpec,

    /// Columns of the grid
    #[cfg_attr(feature = "serde", serde(default = "default_vol_axis"))]
    pub vol_axis: AxisSpec,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spot: default_spot(),
            strike: default_strike(),
            expiry: default_expiry(),
            rate: default_rate(),
            vol: default_vol(),
            dividend: 0.0,
            spot_axis: default_spot_axis(),
            vol_axis: default_vol_axis(),
        }
    }
}

impl GridConfig {
    /// 21 x 21 grid, spot 50..150, vol 5%..80%
    pub fn standard() -> Self {
        Self::default()
    }

    /// 101 x 76 grid over the same ranges as [`GridConfig::standard`]
    pub fn fine() -> Self {
        Self {
            spot_axis: AxisSpec::new(50.0, 150.0, 101),
            vol_axis: AxisSpec::new(0.05, 0.80, 76),
            ..Self::default()
        }
    }

    /// 5 x 5 grid, quick checks
    pub fn coarse() -> Self {
        Self {
            spot_axis: AxisSpec::new(80.0, 120.0, 5),
            vol_axis: AxisSpec::new(0.1, 0.5, 5),
            ..Self::default()
        }
    }

    /// Validated base contract of the grid.
    pub fn base_params(&self) -> Result<PricingParameters, PricingError> {
        PricingParameters::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.vol,
            self.dividend,
        )
    }

    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: GridConfig = toml::from_str(s).context("failed to parse grid config")?;
        config
            .base_params()
            .context("grid config has invalid base parameters")?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grid config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("in {}", path.display()))
    }
}

fn default_spot() -> f64 {
    100.0
}

fn default_strike() -> f64 {
    100.0
}

fn default_expiry() -> f64 {
    1.0
}

fn default_rate() -> f64 {
    0.05
}

fn default_vol() -> f64 {
    0.2
}

fn default_spot_axis() -> AxisSpec {
    AxisSpec::new(50.0, 150.0, 21)
}

fn default_vol_axis() -> AxisSpec {
    AxisSpec::new(0.05, 0.80, 21)
}
