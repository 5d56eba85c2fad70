use ndarray::{Array2, ArrayD, Ix2};

use super::config::GridConfig;
use super::types::PriceGrid;
use crate::error::{PricingError, Result};
use crate::models::bs::{price_call_batch, price_put_batch, BatchParameters};

/// Price calls and puts over the spot x volatility mesh described by `config`.
///
/// The spot axis is laid out as an `n x 1` column and the volatility axis as a
/// `1 x m` row; the batched pricer broadcasts them to `n x m`.
pub fn price_grid(config: &GridConfig) -> Result<PriceGrid> {
    let base = config.base_params()?;
    let spots = config.spot_axis.values()?;
    let vols = config.vol_axis.values()?;

    let spot_col = Array2::from_shape_vec((spots.len(), 1), spots.clone())
        .map_err(|e| PricingError::InvalidGrid(e.to_string()))?;
    let vol_row = Array2::from_shape_vec((1, vols.len()), vols.clone())
        .map_err(|e| PricingError::InvalidGrid(e.to_string()))?;

    tracing::debug!(
        rows = spots.len(),
        cols = vols.len(),
        "pricing spot/vol grid"
    );

    let batch = BatchParameters::from_params(&base)
        .with_spot(&spot_col)
        .with_vol(&vol_row);

    let dim = (spots.len(), vols.len());
    let calls = into_matrix(price_call_batch(&batch)?, dim)?;
    let puts = into_matrix(price_put_batch(&batch)?, dim)?;

    Ok(PriceGrid {
        base,
        spots,
        vols,
        calls,
        puts,
    })
}

/// Batch output as a `rows x cols` matrix; any other shape is a `ShapeMismatch`.
fn into_matrix(values: ArrayD<f64>, (rows, cols): (usize, usize)) -> Result<Array2<f64>> {
    let mismatch = |found: &[usize]| PricingError::ShapeMismatch {
        expected: vec![rows, cols],
        found: found.to_vec(),
    };
    if values.shape() != [rows, cols].as_slice() {
        return Err(mismatch(values.shape()));
    }
    let found = values.shape().to_vec();
    values
        .into_dimensionality::<Ix2>()
        .map_err(|_| mismatch(&found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, IxDyn};

    #[test]
    fn test_into_matrix_checks_grid_shape() {
        let ok = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
        let m = into_matrix(ok, (2, 3)).unwrap();
        assert_eq!(m[[1, 2]], 6.0);

        let flat = ArrayD::from_shape_vec(IxDyn(&[6]), vec![0.0; 6]).unwrap();
        assert_eq!(
            into_matrix(flat, (2, 3)).unwrap_err(),
            PricingError::ShapeMismatch { expected: vec![2, 3], found: vec![6] }
        );

        let transposed = ArrayD::from_shape_vec(IxDyn(&[3, 2]), vec![0.0; 6]).unwrap();
        assert_eq!(
            into_matrix(transposed, (2, 3)).unwrap_err(),
            PricingError::ShapeMismatch { expected: vec![2, 3], found: vec![3, 2] }
        );
    }

    #[test]
    fn test_price_grid_dimensions_follow_axes() {
        let grid = price_grid(&GridConfig::coarse()).unwrap();
        assert_eq!(grid.calls.shape(), &[5, 5]);
        assert_eq!(grid.puts.dim(), (grid.spots.len(), grid.vols.len()));
    }
}
