//! Slip grid generation and arg-max selection.
//!
//! The maximum of TE(i) is located by a deterministic grid search rather than
//! a derivative-based solver: TE is singular at `i = 0`, and a dense scan needs
//! no smoothness assumptions. Both helpers here are deterministic given the
//! same inputs.

use crate::error::ModelError;

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, ModelError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(ModelError::InvalidRange { min, max });
    }
    if steps < 2 {
        return Err(ModelError::TooFewSamples {
            what: "grid steps",
            got: steps,
        });
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for k in 0..steps {
        out.push(min + step * k as f64);
    }
    // Pin the last point so rounding never pushes it past `max`.
    if let Some(last) = out.last_mut() {
        *last = max;
    }
    Ok(out)
}

/// Index of the largest defined value; ties resolve to the first occurrence.
///
/// `None` entries never win against a defined value. When no entry is defined
/// the first index is returned (or `None` for an empty slice).
pub fn argmax_first(values: &[Option<f64>]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (idx, value) in values.iter().enumerate() {
        let Some(v) = value.filter(|v| !v.is_nan()) else {
            continue;
        };
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((idx, v)),
        }
    }

    Some(best.map(|(idx, _)| idx).unwrap_or(0))
}
