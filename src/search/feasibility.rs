//! Is a target traction efficiency reachable for a given coefficient?
//!
//! A target is achievable iff `target <= TE* + 1e-9`. The tolerance absorbs
//! floating-point noise and the grid resolution of the maximum search.

use tracing::debug;

use crate::domain::{FeasibilityResult, GroundCoefficient, TargetEfficiency};
use crate::error::ModelError;
use crate::search::maximum::{DEFAULT_SEARCH_STEPS, find_maximum};

pub const FEASIBILITY_TOLERANCE: f64 = 1e-9;

/// Compare `target` with the maximum found on the default search grid.
pub fn check_feasibility(
    target: TargetEfficiency,
    cn: GroundCoefficient,
) -> Result<FeasibilityResult, ModelError> {
    check_feasibility_with_steps(target, cn, DEFAULT_SEARCH_STEPS)
}

/// `check_feasibility` with an explicit search resolution.
pub fn check_feasibility_with_steps(
    target: TargetEfficiency,
    cn: GroundCoefficient,
    steps: usize,
) -> Result<FeasibilityResult, ModelError> {
    let maximum = find_maximum(cn, steps)?;
    let te_max = maximum.usable_te();

    // An undefined optimum can never satisfy a target.
    let achievable = te_max.is_some_and(|te| target.get() <= te + FEASIBILITY_TOLERANCE);
    let margin = te_max.map(|te| te - target.get());

    debug!(target = target.get(), cn = cn.get(), achievable, ?margin, "feasibility checked");

    Ok(FeasibilityResult {
        target,
        coefficient: cn,
        te_max,
        slip_at_max: maximum.slip,
        achievable,
        margin,
    })
}

/// Raw-number entry point: validates both inputs before checking.
pub fn check_feasibility_raw(target: f64, cn: f64) -> Result<FeasibilityResult, ModelError> {
    let target = TargetEfficiency::new(target)?;
    let cn = GroundCoefficient::new(cn)?;
    check_feasibility(target, cn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn cn(v: f64) -> GroundCoefficient {
        GroundCoefficient::new(v).unwrap()
    }

    fn target(v: f64) -> TargetEfficiency {
        TargetEfficiency::new(v).unwrap()
    }

    #[test]
    fn moderate_target_is_reachable_on_firm_ground() {
        let r = check_feasibility(target(0.60), cn(40.0)).unwrap();
        assert!(r.achievable);
        assert_abs_diff_eq!(r.te_max.unwrap(), 0.781, epsilon = 1e-3);
        assert_abs_diff_eq!(r.margin.unwrap(), 0.181, epsilon = 1e-3);
    }

    #[test]
    fn high_target_is_unreachable_on_soft_ground() {
        let r = check_feasibility(target(0.95), cn(5.0)).unwrap();
        assert!(!r.achievable);
        assert!(r.margin.unwrap() < -0.7);
        assert!(r.te_max.unwrap() < 0.2);
    }

    #[test]
    fn target_equal_to_maximum_is_reachable() {
        let te_max = check_feasibility(target(0.5), cn(40.0)).unwrap().te_max.unwrap();
        let r = check_feasibility(target(te_max), cn(40.0)).unwrap();
        assert!(r.achievable);
    }

    #[test]
    fn target_within_tolerance_band_is_reachable() {
        let te_max = check_feasibility(target(0.5), cn(40.0)).unwrap().te_max.unwrap();

        let inside = check_feasibility(target(te_max + 5e-10), cn(40.0)).unwrap();
        assert!(inside.achievable);
        assert!(inside.margin.unwrap() < 0.0);

        let outside = check_feasibility(target(te_max + 2e-9), cn(40.0)).unwrap();
        assert!(!outside.achievable);
    }

    #[test]
    fn feasibility_is_monotone_in_target() {
        for c in [2.0, 5.0, 20.0, 40.0, 80.0] {
            let mut seen_unreachable = false;
            for k in 1..100 {
                let r = check_feasibility(target(k as f64 / 100.0), cn(c)).unwrap();
                if seen_unreachable {
                    assert!(!r.achievable, "cn={c} t={k}");
                }
                seen_unreachable |= !r.achievable;
            }
        }
    }

    #[test]
    fn undefined_optimum_is_never_achievable() {
        let r = check_feasibility(target(0.01), cn(1e-16)).unwrap();
        assert!(!r.achievable);
        assert_eq!(r.te_max, None);
        assert_eq!(r.margin, None);
    }

    #[test]
    fn raw_entry_point_rejects_bad_parameters() {
        assert_eq!(
            check_feasibility_raw(0.6, 0.0),
            Err(ModelError::InvalidCoefficient(0.0))
        );
        assert_eq!(
            check_feasibility_raw(1.2, 40.0),
            Err(ModelError::InvalidTarget(1.2))
        );
        assert!(check_feasibility_raw(0.6, 40.0).is_ok());
    }
}
