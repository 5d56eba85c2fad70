//! Spot x volatility price grids, the numbers behind a price heatmap.

pub mod config;
pub mod pipeline;
pub mod types;

pub use config::{AxisSpec, GridConfig};
pub use pipeline::price_grid;
pub use types::{GridCell, PriceGrid};
