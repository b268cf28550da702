//! Short comparative remarks about a curve set.
//!
//! This is a fixed decision table over threshold comparisons, evaluated in order:
//!
//! 1. the selected curve's optimum `(i*, TE*)`
//! 2. TE at `i = 0.10` against `TE*` (headroom vs. already close)
//! 3. TE at `i = 0.60` (loss vs. decline)
//! 4. the best curve in the set, or the runner-up when the selected curve is best
//! 5. generic fallbacks until there are at least two remarks
//!
//! Undefined or non-finite values make the corresponding rule silent.

use std::fmt;

use tracing::warn;

use crate::curves::SELECTION_TOLERANCE;
use crate::domain::{Curve, CurveSet, GroundCoefficient};
use crate::models::evaluate_te;

/// Slip ratio used to probe the low-slip region.
pub const LOW_SLIP_PROBE: f64 = 0.10;

/// Slip ratio used to probe the high-slip region.
pub const HIGH_SLIP_PROBE: f64 = 0.60;

/// `TE* - TE(0.10)` above this counts as headroom.
pub const HEADROOM_THRESHOLD: f64 = 0.05;

/// Minimum number of remarks produced.
pub const MIN_REMARKS: usize = 2;

/// One diagnostic statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Remark {
    Optimum {
        cn: GroundCoefficient,
        te_max: f64,
        slip: f64,
    },
    Headroom {
        te_low: f64,
        te_max: f64,
    },
    NearOptimum {
        te_low: f64,
        te_max: f64,
    },
    HighSlipLoss {
        te_high: f64,
    },
    DecliningPastOptimum {
        te_high: f64,
    },
    BestAlternative {
        cn: GroundCoefficient,
        te_max: f64,
        slip: f64,
    },
    RunnerUp {
        cn: GroundCoefficient,
        te_max: f64,
    },
    GeneralShape,
    CheckInputs,
}

impl fmt::Display for Remark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remark::Optimum { cn, te_max, slip } => write!(
                f,
                "Cn = {cn}: maximum TE ≈ {te_max:.3} at slip i ≈ {slip:.3}."
            ),
            Remark::Headroom { te_low, te_max } => write!(
                f,
                "At i = {LOW_SLIP_PROBE:.2}, TE ≈ {te_low:.3}; there is headroom to reach the optimum (TE* ≈ {te_max:.3})."
            ),
            Remark::NearOptimum { te_low, te_max } => write!(
                f,
                "At i = {LOW_SLIP_PROBE:.2}, TE ≈ {te_low:.3}; already close to optimum (TE* ≈ {te_max:.3})."
            ),
            Remark::HighSlipLoss { te_high } => write!(
                f,
                "At i = {HIGH_SLIP_PROBE:.2}, TE ≈ {te_high:.3}; efficiency loss at high slip."
            ),
            Remark::DecliningPastOptimum { te_high } => write!(
                f,
                "At i = {HIGH_SLIP_PROBE:.2}, TE ≈ {te_high:.3}; efficiency declining away from optimum."
            ),
            Remark::BestAlternative { cn, te_max, slip } => write!(
                f,
                "Best alternative: Cn = {cn} reaches TE* ≈ {te_max:.3} at i ≈ {slip:.3}."
            ),
            Remark::RunnerUp { cn, te_max } => write!(
                f,
                "Selected curve has the highest optimum; next best is Cn = {cn} with TE* ≈ {te_max:.3}."
            ),
            Remark::GeneralShape => write!(
                f,
                "TE rises from zero slip to a single peak and falls back as slip approaches 1."
            ),
            Remark::CheckInputs => write!(
                f,
                "No usable optimum for comparison; a higher Cn (firmer ground) raises the achievable TE."
            ),
        }
    }
}

/// Derive the ordered remarks for `curve_set`, centred on its selected curve.
///
/// `selected_cn` is only used when the set has no selected curve; when both are
/// present and disagree, the set's own flag wins so every rule describes the
/// same curve.
pub fn derive_remarks(curve_set: &CurveSet, selected_cn: GroundCoefficient) -> Vec<Remark> {
    let mut remarks = Vec::new();

    let curves = curve_set.curves();
    let selected_idx = curves.iter().position(Curve::is_selected);
    let selected_cn = match selected_idx {
        Some(idx) => {
            let flagged = curves[idx].coefficient();
            if !flagged.same_as(selected_cn, SELECTION_TOLERANCE) {
                warn!(
                    requested = selected_cn.get(),
                    flagged = flagged.get(),
                    "commentary follows the curve flagged as selected"
                );
            }
            flagged
        }
        None => selected_cn,
    };
    let selected_max = selected_idx.and_then(|idx| {
        let m = curves[idx].maximum();
        m.usable_te().map(|te| (te, m.slip))
    });

    // 1) Optimum of the selected curve.
    if let Some((te_max, slip)) = selected_max {
        remarks.push(Remark::Optimum {
            cn: selected_cn,
            te_max,
            slip,
        });
    }

    // 2) Low-slip probe against the optimum.
    let te_low = finite_te(LOW_SLIP_PROBE, selected_cn);
    if let (Some(te_low), Some((te_max, _))) = (te_low, selected_max) {
        if te_max - te_low > HEADROOM_THRESHOLD {
            remarks.push(Remark::Headroom { te_low, te_max });
        } else {
            remarks.push(Remark::NearOptimum { te_low, te_max });
        }
    }

    // 3) High-slip probe.
    if let Some(te_high) = finite_te(HIGH_SLIP_PROBE, selected_cn) {
        if te_high < 0.0 {
            remarks.push(Remark::HighSlipLoss { te_high });
        } else {
            remarks.push(Remark::DecliningPastOptimum { te_high });
        }
    }

    // 4) Cross-curve comparison.
    if curve_set.len() > 1 {
        if let Some(remark) = compare_curves(curves, selected_idx) {
            remarks.push(remark);
        }
    }

    // 5) Fallbacks.
    while remarks.len() < MIN_REMARKS {
        if remarks.contains(&Remark::GeneralShape) {
            remarks.push(Remark::CheckInputs);
        } else {
            remarks.push(Remark::GeneralShape);
        }
    }

    remarks
}

/// Render the remarks as plain strings for the presentation layer.
pub fn generate_commentary(curve_set: &CurveSet, selected_cn: GroundCoefficient) -> Vec<String> {
    derive_remarks(curve_set, selected_cn)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn finite_te(slip: f64, cn: GroundCoefficient) -> Option<f64> {
    evaluate_te(slip, cn).filter(|v| v.is_finite())
}

fn compare_curves(curves: &[Curve], selected_idx: Option<usize>) -> Option<Remark> {
    // (index, TE*) of curves with a usable optimum, in set order.
    let ranked: Vec<(usize, f64)> = curves
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| c.maximum().usable_te().map(|te| (idx, te)))
        .collect();

    let best = first_max(&ranked)?;
    if Some(best.0) != selected_idx {
        let curve = &curves[best.0];
        return Some(Remark::BestAlternative {
            cn: curve.coefficient(),
            te_max: best.1,
            slip: curve.maximum().slip,
        });
    }

    let others: Vec<(usize, f64)> = ranked.into_iter().filter(|&(idx, _)| idx != best.0).collect();
    let runner_up = first_max(&others)?;
    Some(Remark::RunnerUp {
        cn: curves[runner_up.0].coefficient(),
        te_max: runner_up.1,
    })
}

fn first_max(items: &[(usize, f64)]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for &(idx, te) in items {
        match best {
            Some((_, b)) if te <= b => {}
            _ => best = Some((idx, te)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{DEFAULT_PLOT_SAMPLES, build_curve_set, build_default_curve_set};

    fn cn(v: f64) -> GroundCoefficient {
        GroundCoefficient::new(v).unwrap()
    }

    #[test]
    fn firm_ground_commentary() {
        let set = build_default_curve_set(cn(40.0)).unwrap();
        let remarks = derive_remarks(&set, cn(40.0));

        assert_eq!(remarks.len(), 4);
        assert!(matches!(remarks[0], Remark::Optimum { .. }));
        // TE(0.10) ≈ 0.780 vs TE* ≈ 0.781.
        assert!(matches!(remarks[1], Remark::NearOptimum { .. }));
        // TE(0.60) ≈ 0.363.
        assert!(matches!(remarks[2], Remark::DecliningPastOptimum { .. }));
        match &remarks[3] {
            Remark::BestAlternative { cn, .. } => assert_eq!(cn.get(), 50.0),
            other => panic!("unexpected remark: {other:?}"),
        }
    }

    #[test]
    fn soft_ground_has_headroom() {
        let set = build_default_curve_set(cn(5.0)).unwrap();
        let remarks = derive_remarks(&set, cn(5.0));
        // TE(0.10) at Cn = 5 is strongly negative, far below TE* ≈ 0.15.
        assert!(matches!(remarks[1], Remark::Headroom { .. }));
    }

    #[test]
    fn very_soft_ground_loses_efficiency_at_high_slip() {
        let set = build_default_curve_set(cn(1.0)).unwrap();
        let remarks = derive_remarks(&set, cn(1.0));
        assert!(remarks.iter().any(|r| matches!(r, Remark::HighSlipLoss { .. })));
    }

    #[test]
    fn runner_up_reported_when_selected_is_best() {
        let set = build_curve_set(cn(40.0), &[0.0, -10.0, -20.0], DEFAULT_PLOT_SAMPLES).unwrap();
        let remarks = derive_remarks(&set, cn(40.0));
        match remarks.last().unwrap() {
            Remark::RunnerUp { cn, .. } => assert_eq!(cn.get(), 30.0),
            other => panic!("unexpected remark: {other:?}"),
        }
    }

    #[test]
    fn selected_flag_wins_over_a_mismatched_coefficient() {
        let set = build_default_curve_set(cn(40.0)).unwrap();
        let remarks = derive_remarks(&set, cn(30.0));

        match &remarks[0] {
            Remark::Optimum { cn, .. } => assert_eq!(cn.get(), 40.0),
            other => panic!("unexpected remark: {other:?}"),
        }
        assert_eq!(remarks, derive_remarks(&set, cn(40.0)));
    }

    #[test]
    fn single_curve_skips_comparison() {
        let set = build_curve_set(cn(40.0), &[0.0], DEFAULT_PLOT_SAMPLES).unwrap();
        let remarks = derive_remarks(&set, cn(40.0));
        assert_eq!(remarks.len(), 3);
        assert!(!remarks.iter().any(|r| matches!(
            r,
            Remark::BestAlternative { .. } | Remark::RunnerUp { .. }
        )));
    }

    #[test]
    fn degenerate_coefficient_still_yields_two_lines() {
        let set = build_curve_set(cn(1e-16), &[0.0], 50).unwrap();
        let lines = generate_commentary(&set, cn(1e-16));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Remark::GeneralShape.to_string());
        assert_eq!(lines[1], Remark::CheckInputs.to_string());
    }

    #[test]
    fn always_at_least_two_lines() {
        for c in [0.01, 0.5, 3.0, 8.0, 15.0, 40.0, 120.0] {
            let set = build_default_curve_set(cn(c)).unwrap();
            assert!(generate_commentary(&set, cn(c)).len() >= MIN_REMARKS, "cn={c}");
        }
    }

    #[test]
    fn optimum_line_is_formatted() {
        let set = build_default_curve_set(cn(40.0)).unwrap();
        let lines = generate_commentary(&set, cn(40.0));
        assert!(lines[0].starts_with("Cn = 40: maximum TE ≈ 0.781 at slip i ≈ 0.087"));
    }
}
