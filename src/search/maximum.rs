//! Maximum traction efficiency over the slip range `[1e-6, 0.90]`.
//!
//! Given a coefficient and a step count we:
//! - lay out a uniform slip grid
//! - evaluate TE at each grid point (parallel)
//! - pick the best sample, lowest slip on ties
//!
//! The result is only as precise as the grid spacing
//! (`0.9 / (steps - 1)`); raise `steps` for a tighter estimate.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{GroundCoefficient, Maximum, SEARCH_SLIP_MAX, SEARCH_SLIP_MIN};
use crate::error::ModelError;
use crate::models::evaluate_te;
use crate::search::grid::{argmax_first, lin_space};

/// Default number of grid points for the maximum search.
pub const DEFAULT_SEARCH_STEPS: usize = 4000;

/// Locate `(i*, TE*)` for `cn` on a `steps`-point grid.
///
/// If TE is undefined across the whole grid, the first grid point is returned
/// with `te: None`; treat that as "no usable optimum".
pub fn find_maximum(cn: GroundCoefficient, steps: usize) -> Result<Maximum, ModelError> {
    let slips = lin_space(SEARCH_SLIP_MIN, SEARCH_SLIP_MAX, steps)?;

    // `collect` on an indexed parallel iterator preserves order, so the
    // tie-break below sees the same sequence as a serial scan.
    let values: Vec<Option<f64>> = slips.par_iter().map(|&i| evaluate_te(i, cn)).collect();

    let idx = argmax_first(&values).unwrap_or(0);
    let maximum = Maximum {
        slip: slips[idx],
        te: values[idx],
    };

    debug!(cn = cn.get(), steps, slip = maximum.slip, te = ?maximum.te, "maximum search done");
    Ok(maximum)
}

/// `find_maximum` with the default resolution.
pub fn find_maximum_default(cn: GroundCoefficient) -> Result<Maximum, ModelError> {
    find_maximum(cn, DEFAULT_SEARCH_STEPS)
}
