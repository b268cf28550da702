//! Shared "run pipeline" logic used by the CLI subcommands and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> maximum search -> feasibility -> (unlocked) curves -> commentary
//!
//! The CLI can then focus on presentation (printing, plotting, exports).

use tracing::{info, warn};

use crate::curves::build_curve_set_with_steps;
use crate::domain::{CurveSet, FeasibilityResult, GroundCoefficient, RunConfig};
use crate::error::AppError;
use crate::report::generate_commentary;
use crate::search::check_feasibility_with_steps;

/// All computed outputs of a single `te run`.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub feasibility: FeasibilityResult,
    /// Present only when the target is achievable ("unlocked").
    pub curve_set: Option<CurveSet>,
    pub commentary: Vec<String>,
}

impl RunOutput {
    /// Whether the curve view is available for this run.
    pub fn is_unlocked(&self) -> bool {
        self.curve_set.is_some()
    }
}

/// Execute the full pipeline and return the computed outputs.
pub fn run(config: &RunConfig) -> Result<RunOutput, AppError> {
    // 1) Feasibility (one maximum search).
    let feasibility =
        check_feasibility_with_steps(config.target, config.coefficient, config.search_steps)?;

    if !feasibility.achievable {
        warn!(
            target = config.target.get(),
            cn = config.coefficient.get(),
            te_max = ?feasibility.te_max,
            "target TE is not reachable; curve view stays locked"
        );
        return Ok(RunOutput {
            feasibility,
            curve_set: None,
            commentary: Vec::new(),
        });
    }

    // 2) Curves and commentary.
    let (curve_set, commentary) = build_curves(
        config.coefficient,
        &config.offsets,
        config.plot_samples,
        config.search_steps,
    )?;
    info!(
        cn = config.coefficient.get(),
        curves = curve_set.len(),
        remarks = commentary.len(),
        "curve view unlocked"
    );

    Ok(RunOutput {
        feasibility,
        curve_set: Some(curve_set),
        commentary,
    })
}

/// Build the comparison curves and their commentary (no target involved).
pub fn build_curves(
    cn: GroundCoefficient,
    offsets: &[f64],
    samples: usize,
    search_steps: usize,
) -> Result<(CurveSet, Vec<String>), AppError> {
    let curve_set = build_curve_set_with_steps(cn, offsets, samples, search_steps)?;
    let commentary = generate_commentary(&curve_set, cn);
    Ok((curve_set, commentary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{DEFAULT_OFFSETS, DEFAULT_PLOT_SAMPLES};
    use crate::domain::TargetEfficiency;
    use crate::search::DEFAULT_SEARCH_STEPS;

    fn config(target: f64, cn: f64) -> RunConfig {
        RunConfig {
            target: TargetEfficiency::new(target).unwrap(),
            coefficient: GroundCoefficient::new(cn).unwrap(),
            search_steps: DEFAULT_SEARCH_STEPS,
            plot_samples: DEFAULT_PLOT_SAMPLES,
            offsets: DEFAULT_OFFSETS.to_vec(),
            plot: false,
            plot_width: 80,
            plot_height: 24,
            export_json: None,
            export_csv: None,
            export_svg: None,
        }
    }

    #[test]
    fn reachable_target_unlocks_curves() {
        let out = run(&config(0.60, 40.0)).unwrap();
        assert!(out.feasibility.achievable);
        assert!(out.is_unlocked());
        assert_eq!(out.curve_set.as_ref().unwrap().len(), 4);
        assert!(out.commentary.len() >= 2);
    }

    #[test]
    fn unreachable_target_stays_locked() {
        let out = run(&config(0.95, 5.0)).unwrap();
        assert!(!out.feasibility.achievable);
        assert!(!out.is_unlocked());
        assert!(out.commentary.is_empty());
    }

    #[test]
    fn curves_only_marks_requested_coefficient() {
        let cn = GroundCoefficient::new(15.0).unwrap();
        let (set, commentary) = build_curves(cn, &DEFAULT_OFFSETS, 101, 500).unwrap();
        assert_eq!(set.coefficients(), vec![25.0, 15.0, 5.0]);
        assert_eq!(set.selected().map(|c| c.coefficient()), Some(cn));
        assert!(commentary[0].starts_with("Cn = 15"));
    }

    #[test]
    fn zero_search_steps_are_rejected() {
        let mut cfg = config(0.5, 40.0);
        cfg.search_steps = 0;
        assert_eq!(run(&cfg).unwrap_err().exit_code(), 2);
    }
}
