use anyhow::{Context, Result};
use ndarray::Array2;
use std::io::Write;

use crate::models::bs::PricingParameters;

/// One priced point of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub spot: f64,
    pub vol: f64,
    pub call: f64,
    pub put: f64,
}

/// Call and put prices over a spot (rows) by volatility (columns) mesh.
///
/// Only the spot and volatility vary; strike, expiry, rate and dividend are
/// taken from `base`.
#[derive(Debug, Clone)]
pub struct PriceGrid {
    pub base: PricingParameters,
    pub spots: Vec<f64>,
    pub vols: Vec<f64>,
    pub calls: Array2<f64>,
    pub puts: Array2<f64>,
}

impl PriceGrid {
    /// (number of spots, number of vols)
    pub fn shape(&self) -> (usize, usize) {
        (self.spots.len(), self.vols.len())
    }

    pub fn get(&self, i: usize, j: usize) -> Option<GridCell> {
        Some(GridCell {
            spot: *self.spots.get(i)?,
            vol: *self.vols.get(j)?,
            call: *self.calls.get((i, j))?,
            put: *self.puts.get((i, j))?,
        })
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let (rows, cols) = self.shape();
        (0..rows).flat_map(move |i| (0..cols).filter_map(move |j| self.get(i, j)))
    }

    /// Largest absolute put-call parity residual over the grid.
    ///
    /// Parity does not depend on volatility, so each row shares one forward.
    pub fn parity_residual(&self) -> f64 {
        let disc_q = self.base.dividend_discount();
        let disc_r = self.base.rate_discount();
        let strike = self.base.strike();

        self.cells()
            .map(|c| (c.call - c.put - (c.spot * disc_q - strike * disc_r)).abs())
            .fold(0.0, f64::max)
    }

    /// Write `spot,vol,call,put` rows, one per cell, row-major.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["spot", "vol", "call", "put"])
            .context("failed to write csv header")?;
        for cell in self.cells() {
            wtr.write_record(&[
                cell.spot.to_string(),
                cell.vol.to_string(),
                cell.call.to_string(),
                cell.put.to_string(),
            ])
            .context("failed to write csv row")?;
        }
        wtr.flush().context("failed to flush csv output")?;
        Ok(())
    }
}
