// demos/pricing_demo.rs

//! Demonstration of closed-form pricing and grid generation
//!
//! This example shows how to:
//! 1. Price a call and a put for one contract
//! 2. Run the put-call parity sanity check
//! 3. Build a spot x volatility price grid
//! 4. Export the grid as CSV for a heatmap renderer
//!
//! Run with `RUST_LOG=debug` to see the library's tracing output, and pass a
//! TOML file path to override the default grid.

use anyhow::{Context, Result};
use bsm_lib::{default_grids, price_grid, price_pair, GridConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GridConfig::from_file(&path)?,
        None => default_grids::standard(),
    };
    let params = config.base_params().context("invalid base contract")?;

    println!("Black-Scholes-Merton Pricing Demo");
    println!("=================================");
    println!(
        "S = {}, K = {}, T = {}, r = {:.4}, q = {:.4}, sigma = {:.4}",
        params.spot(),
        params.strike(),
        params.expiry(),
        params.rate(),
        params.dividend(),
        params.vol()
    );

    println!("\nStep 1: Pricing...");
    let (call, put, parity) = price_pair(&params);
    println!("  Call price: {:.4}", call);
    println!("  Put price:  {:.4}", put);

    println!("\nStep 2: Sanity check (put-call parity)");
    println!("  Call - Put            = {:.6}", parity.lhs);
    println!("  S e^(-qT) - K e^(-rT) = {:.6}", parity.rhs);
    println!("  Diff                  = {:.6e}", parity.diff());

    println!("\nStep 3: Pricing grid...");
    let grid = price_grid(&config)?;
    let (rows, cols) = grid.shape();
    println!("  {} spots x {} vols", rows, cols);
    println!("  Max parity residual: {:.3e}", grid.parity_residual());

    println!("\nStep 4: CSV export\n");
    grid.write_csv(std::io::stdout().lock())?;

    Ok(())
}
