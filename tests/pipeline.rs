//! End-to-end checks of the `te run` pipeline through the library API.

use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use te_curves::app::pipeline;
use te_curves::curves::{DEFAULT_OFFSETS, DEFAULT_PLOT_SAMPLES};
use te_curves::domain::{GroundCoefficient, RunConfig, TargetEfficiency};
use te_curves::io::{curve_file, read_curve_json, write_curve_json, write_samples_csv};
use te_curves::models::evaluate_te;
use te_curves::search::{DEFAULT_SEARCH_STEPS, find_maximum_default};

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

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("te-it-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn maximum_and_point_values_for_cn_40() {
    let cn = GroundCoefficient::new(40.0).unwrap();
    let max = find_maximum_default(cn).unwrap();
    assert_abs_diff_eq!(max.te.unwrap(), 0.781, epsilon = 1e-3);
    assert!((0.085..=0.091).contains(&max.slip));

    assert_abs_diff_eq!(evaluate_te(0.6, cn).unwrap(), 0.3626, epsilon = 1e-4);
    assert_abs_diff_eq!(evaluate_te(0.1, cn).unwrap(), 0.7798, epsilon = 1e-4);
}

#[test]
fn reachable_target_produces_full_output() {
    let out = pipeline::run(&config(0.60, 40.0)).unwrap();

    assert!(out.feasibility.achievable);
    assert_abs_diff_eq!(out.feasibility.margin.unwrap(), 0.181, epsilon = 1e-3);

    let set = out.curve_set.as_ref().unwrap();
    assert_eq!(set.coefficients(), vec![50.0, 40.0, 30.0, 20.0]);
    assert_eq!(set.curves().iter().filter(|c| c.is_selected()).count(), 1);
    assert!(out.commentary.len() >= 2);
    assert!(out.commentary[0].starts_with("Cn = 40: maximum TE ≈ 0.781"));
}

#[test]
fn unreachable_target_keeps_curves_locked() {
    let out = pipeline::run(&config(0.95, 5.0)).unwrap();

    assert!(!out.feasibility.achievable);
    assert!(out.feasibility.te_max.unwrap() < 0.2);
    assert!(out.feasibility.margin.unwrap() < -0.7);
    assert!(!out.is_unlocked());
}

#[test]
fn low_coefficient_drops_non_positive_variants() {
    // 5 + 10 and 5 survive; 5 - 10 and 5 - 20 are dropped.
    let out = pipeline::run(&config(0.10, 5.0)).unwrap();
    let set = out.curve_set.unwrap();
    assert_eq!(set.coefficients(), vec![15.0, 5.0]);
    assert!(set.selected().unwrap().coefficient().same_as(GroundCoefficient::new(5.0).unwrap(), 1e-9));
}

#[test]
fn exports_round_trip_through_disk() {
    let dir = scratch_dir("exports");
    let out = pipeline::run(&config(0.50, 30.0)).unwrap();
    let set = out.curve_set.as_ref().unwrap();

    let json = dir.join("curve.json");
    write_curve_json(&json, &curve_file(set, Some(&out.feasibility), &out.commentary)).unwrap();
    let back = read_curve_json(&json).unwrap();
    assert_eq!(&back.curve_set, set);
    assert_eq!(back.feasibility, Some(out.feasibility));
    assert_eq!(back.commentary, out.commentary);

    let csv = dir.join("samples.csv");
    write_samples_csv(&csv, set).unwrap();
    let text = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(text.lines().count(), 1 + set.len() * DEFAULT_PLOT_SAMPLES);

    std::fs::remove_dir_all(&dir).ok();
}
