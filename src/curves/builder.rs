//! Comparison curves around a requested coefficient.
//!
//! For `Cn` and offsets `{+10, 0, -10, -20}` we build one sampled TE(i) curve per
//! surviving coefficient (`Cn + offset > 0`), each tagged with its maximum from
//! the grid search. Offsets that push the coefficient to zero or below are
//! dropped without producing a curve.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{
    Curve, CurvePoint, CurveSet, GroundCoefficient, PLOT_SLIP_MAX, PLOT_SLIP_MIN,
};
use crate::error::ModelError;
use crate::models::evaluate_te;
use crate::search::{DEFAULT_SEARCH_STEPS, find_maximum, lin_space};

/// Additive offsets applied to the requested coefficient, in output order.
pub const DEFAULT_OFFSETS: [f64; 4] = [10.0, 0.0, -10.0, -20.0];

/// Samples per curve over `[0, 1]`.
pub const DEFAULT_PLOT_SAMPLES: usize = 800;

/// Coefficients closer than this to the requested one mark the selected curve.
pub const SELECTION_TOLERANCE: f64 = 1e-9;

/// Build the comparison curves for `cn`.
pub fn build_curve_set(
    cn: GroundCoefficient,
    offsets: &[f64],
    samples: usize,
) -> Result<CurveSet, ModelError> {
    build_curve_set_with_steps(cn, offsets, samples, DEFAULT_SEARCH_STEPS)
}

/// `build_curve_set` with the default offsets and sampling.
pub fn build_default_curve_set(cn: GroundCoefficient) -> Result<CurveSet, ModelError> {
    build_curve_set(cn, &DEFAULT_OFFSETS, DEFAULT_PLOT_SAMPLES)
}

/// `build_curve_set` with an explicit resolution for each curve's maximum.
pub fn build_curve_set_with_steps(
    cn: GroundCoefficient,
    offsets: &[f64],
    samples: usize,
    search_steps: usize,
) -> Result<CurveSet, ModelError> {
    if samples < 2 {
        return Err(ModelError::TooFewSamples {
            what: "curve samples",
            got: samples,
        });
    }
    let slips = lin_space(PLOT_SLIP_MIN, PLOT_SLIP_MAX, samples)?;

    let coefficients: Vec<GroundCoefficient> =
        offsets.iter().filter_map(|&delta| cn.offset(delta)).collect();
    if coefficients.len() < offsets.len() {
        debug!(
            requested = cn.get(),
            dropped = offsets.len() - coefficients.len(),
            "dropped non-positive coefficient variants"
        );
    }

    // Keep only the first match so a duplicated zero offset cannot select twice.
    let selected_idx = coefficients
        .iter()
        .position(|c| c.same_as(cn, SELECTION_TOLERANCE));

    let curves = coefficients
        .par_iter()
        .enumerate()
        .map(|(idx, &coefficient)| -> Result<Curve, ModelError> {
            let points = slips
                .iter()
                .map(|&slip| CurvePoint {
                    slip,
                    te: evaluate_te(slip, coefficient),
                })
                .collect();
            let maximum = find_maximum(coefficient, search_steps)?;
            Ok(Curve::new(coefficient, points, maximum, Some(idx) == selected_idx))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CurveSet::new(cn, curves))
}
