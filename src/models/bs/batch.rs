//! Elementwise pricing over n-dimensional arrays of parameters.
//!
//! Each of the six inputs may be a scalar or an array. Shapes are broadcast the
//! NumPy way: axes are aligned from the right and an axis of length 1 stretches
//! to match. Every output element is produced by the scalar formulas in
//! [`super::pricer`] on that element's parameters, so a batch and a loop of
//! scalar calls agree exactly.
//!
//! ```rust
//! use bsm_lib::models::bs::batch::{price_call_batch, BatchParameters};
//! use ndarray::array;
//!
//! let spots = array![[90.0], [100.0], [110.0]]; // 3 x 1
//! let vols = array![[0.1, 0.2, 0.3, 0.4]]; // 1 x 4
//! let batch = BatchParameters::new(&spots, 100.0, 1.0, 0.05, &vols, 0.0);
//! let calls = price_call_batch(&batch)?;
//! assert_eq!(calls.shape(), &[3, 4]);
//! # Ok::<(), bsm_lib::PricingError>(())
//! ```

use ndarray::{arr0, Array1, ArrayBase, ArrayD, ArrayViewD, CowArray, Data, Dimension, IxDyn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::pricer::{call_price, compute_d1_d2, put_price};
use super::types::{OptionType, PricingParameters};
use crate::error::{PricingError, Result};

/// One batched parameter: a scalar (0-d array) or an array of any rank.
#[derive(Debug, Clone)]
pub struct BatchInput<'a>(CowArray<'a, f64, IxDyn>);

impl<'a> BatchInput<'a> {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    fn view(&self) -> ArrayViewD<'_, f64> {
        self.0.view()
    }
}

impl<'a> From<f64> for BatchInput<'a> {
    fn from(value: f64) -> Self {
        BatchInput(CowArray::from(arr0(value).into_dyn()))
    }
}

impl<'a> From<Vec<f64>> for BatchInput<'a> {
    fn from(values: Vec<f64>) -> Self {
        BatchInput(CowArray::from(Array1::from(values).into_dyn()))
    }
}

impl<'a, S, D> From<&'a ArrayBase<S, D>> for BatchInput<'a>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    fn from(values: &'a ArrayBase<S, D>) -> Self {
        BatchInput(CowArray::from(values.view().into_dyn()))
    }
}

/// Batched counterpart of [`PricingParameters`]: S, K, T, r, sigma, q.
#[derive(Debug, Clone)]
pub struct BatchParameters<'a> {
    pub spot: BatchInput<'a>,
    pub strike: BatchInput<'a>,
    pub expiry: BatchInput<'a>,
    pub rate: BatchInput<'a>,
    pub vol: BatchInput<'a>,
    pub dividend: BatchInput<'a>,
}

impl<'a> BatchParameters<'a> {
    pub fn new(
        spot: impl Into<BatchInput<'a>>,
        strike: impl Into<BatchInput<'a>>,
        expiry: impl Into<BatchInput<'a>>,
        rate: impl Into<BatchInput<'a>>,
        vol: impl Into<BatchInput<'a>>,
        dividend: impl Into<BatchInput<'a>>,
    ) -> Self {
        Self {
            spot: spot.into(),
            strike: strike.into(),
            expiry: expiry.into(),
            rate: rate.into(),
            vol: vol.into(),
            dividend: dividend.into(),
        }
    }

    /// All six inputs as scalars taken from an existing parameter set.
    pub fn from_params(p: &PricingParameters) -> Self {
        Self::new(p.spot(), p.strike(), p.expiry(), p.rate(), p.vol(), p.dividend())
    }

    pub fn with_spot(mut self, spot: impl Into<BatchInput<'a>>) -> Self {
        self.spot = spot.into();
        self
    }

    pub fn with_vol(mut self, vol: impl Into<BatchInput<'a>>) -> Self {
        self.vol = vol.into();
        self
    }

    fn inputs(&self) -> [&BatchInput<'a>; 6] {
        [
            &self.spot,
            &self.strike,
            &self.expiry,
            &self.rate,
            &self.vol,
            &self.dividend,
        ]
    }

    /// Common shape of all six inputs after broadcasting.
    pub fn broadcast_shape(&self) -> Result<Vec<usize>> {
        let shapes: Vec<&[usize]> = self.inputs().into_iter().map(|i| i.shape()).collect();
        broadcast_shapes(&shapes)
    }

    /// Broadcast and validate every element, returning the shape and the
    /// per-element parameter sets in row-major order. The first invalid
    /// element fails the whole batch.
    pub fn expand(&self) -> Result<(Vec<usize>, Vec<PricingParameters>)> {
        let shape = self.broadcast_shape()?;

        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(6);
        for input in self.inputs() {
            let view = input.view();
            let broadcast = view
                .broadcast(IxDyn(&shape))
                .ok_or_else(|| PricingError::ShapeMismatch {
                    expected: shape.clone(),
                    found: input.shape().to_vec(),
                })?;
            columns.push(broadcast.iter().copied().collect());
        }

        let len: usize = shape.iter().product();
        let params = (0..len)
            .map(|i| {
                PricingParameters::new(
                    columns[0][i],
                    columns[1][i],
                    columns[2][i],
                    columns[3][i],
                    columns[4][i],
                    columns[5][i],
                )
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(?shape, elements = len, "expanded pricing batch");
        Ok((shape, params))
    }
}

/// NumPy broadcasting of a list of shapes.
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1usize; ndim];

    for shape in shapes {
        let offset = ndim - shape.len();
        for (axis, &len) in shape.iter().enumerate() {
            let current = &mut out[offset + axis];
            if *current == len || len == 1 {
                continue;
            }
            if *current == 1 {
                *current = len;
            } else {
                return Err(PricingError::ShapeMismatch {
                    expected: out.clone(),
                    found: shape.to_vec(),
                });
            }
        }
    }
    Ok(out)
}

fn map_batch(batch: &BatchParameters<'_>, f: fn(&PricingParameters) -> f64) -> Result<ArrayD<f64>> {
    let (shape, params) = batch.expand()?;
    collect_shaped(&shape, &params, f)
}

/// Apply `f` to already expanded parameters and lay the results out in `shape`.
fn collect_shaped(
    shape: &[usize],
    params: &[PricingParameters],
    f: fn(&PricingParameters) -> f64,
) -> Result<ArrayD<f64>> {
    #[cfg(feature = "parallel")]
    let values: Vec<f64> = params.par_iter().map(f).collect();
    #[cfg(not(feature = "parallel"))]
    let values: Vec<f64> = params.iter().map(f).collect();

    ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| PricingError::ShapeMismatch {
        expected: shape.to_vec(),
        found: vec![params.len()],
    })
}

/// d1 and d2 for every element of the batch, as two arrays of the broadcast shape.
pub fn d1_d2_batch(batch: &BatchParameters<'_>) -> Result<(ArrayD<f64>, ArrayD<f64>)> {
    let (shape, params) = batch.expand()?;
    let d1 = collect_shaped(&shape, &params, |p| compute_d1_d2(p).d1)?;
    let d2 = collect_shaped(&shape, &params, |p| compute_d1_d2(p).d2)?;
    Ok((d1, d2))
}

pub fn price_call_batch(batch: &BatchParameters<'_>) -> Result<ArrayD<f64>> {
    map_batch(batch, call_price)
}

pub fn price_put_batch(batch: &BatchParameters<'_>) -> Result<ArrayD<f64>> {
    map_batch(batch, put_price)
}

/// Batched form of [`super::pricer::price`]. The option type is checked first.
pub fn price_batch(option_type: &str, batch: &BatchParameters<'_>) -> Result<ArrayD<f64>> {
    match option_type.parse::<OptionType>()? {
        OptionType::Call => price_call_batch(batch),
        OptionType::Put => price_put_batch(batch),
    }
}
