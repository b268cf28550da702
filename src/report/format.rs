//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model/search code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{CurveSet, FeasibilityResult, GroundCoefficient, Maximum};
use crate::models::{evaluate_te, rho};
use crate::report::commentary::{HIGH_SLIP_PROBE, LOW_SLIP_PROBE};

/// Format the feasibility verdict (the "locked/unlocked" message).
pub fn format_feasibility(result: &FeasibilityResult) -> String {
    let mut out = String::new();

    out.push_str("=== te - Traction Efficiency (Wismer–Luth 1974) ===\n");
    out.push_str(&format!(
        "Target TE: {:.3} | Cn: {}\n",
        result.target.get(),
        result.coefficient
    ));

    match result.te_max {
        Some(te_max) if result.achievable => {
            out.push_str(&format!(
                "OK: TEmax ≈ {te_max:.3} (i ≈ {:.3}), margin {:+.3}. Curve view unlocked.\n",
                result.slip_at_max,
                result.margin.unwrap_or(0.0),
            ));
        }
        Some(te_max) => {
            out.push_str(&format!(
                "WARNING: target TE = {:.3} > TEmax ≈ {te_max:.3} (i ≈ {:.3}). \
                 The target is physically unreachable for this Cn.\n",
                result.target.get(),
                result.slip_at_max,
            ));
        }
        None => {
            out.push_str("WARNING: TE is undefined over the whole slip range for this Cn.\n");
        }
    }

    out
}

/// Format a single maximum search result.
pub fn format_maximum(cn: GroundCoefficient, maximum: &Maximum, steps: usize) -> String {
    let spacing = crate::domain::SEARCH_SLIP_MAX / (steps.max(2) as f64 - 1.0);
    match maximum.usable_te() {
        Some(te) => format!(
            "Cn = {cn}: TEmax ≈ {te:.4} at i ≈ {:.4} (grid {steps} pts, ±{spacing:.1e})",
            maximum.slip
        ),
        None => format!("Cn = {cn}: no usable optimum (TE undefined on the {steps}-pt grid)"),
    }
}

/// Format the comparison table for a curve set.
///
/// `*` marks the selected curve.
pub fn format_curve_table(set: &CurveSet) -> String {
    let mut out = String::new();

    let low = format!("TE({LOW_SLIP_PROBE:.2})");
    let high = format!("TE({HIGH_SLIP_PROBE:.2})");
    out.push_str(
        format!(
            "  {:<10} {:>8} {:>9} {:>8} {:>10} {:>10}",
            "Cn", "rho", "TEmax", "i*", low, high
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "  {:-<10} {:-<8} {:-<9} {:-<8} {:-<10} {:-<10}",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for curve in set.curves() {
        let cn = curve.coefficient();
        let chosen = if curve.is_selected() { "*" } else { " " };
        let maximum = curve.maximum();
        out.push_str(
            format!(
                "{chosen} {:<10} {:>8.4} {:>9} {:>8.4} {:>10} {:>10}",
                truncate(&cn.to_string(), 10),
                rho(cn),
                fmt_te(maximum.usable_te()),
                maximum.slip,
                fmt_te(evaluate_te(LOW_SLIP_PROBE, cn)),
                fmt_te(evaluate_te(HIGH_SLIP_PROBE, cn)),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the commentary block.
pub fn format_commentary(lines: &[String]) -> String {
    let mut out = String::from("Commentary:\n");
    for line in lines {
        out.push_str(&format!("- {line}\n"));
    }
    out
}

/// Model equations and symbol legend.
pub fn format_formulas() -> String {
    let lines = [
        "Wismer–Luth equations (1974)",
        "",
        "Rolling resistance coefficient:",
        "  ρ = Fr / W = 1.2 / Cn + 0.04",
        "Circumferential force coefficient:",
        "  μ = Mt / (W·r) = 0.75 · (1 − e^(−0.3·Cn·i))",
        "Traction force coefficient:",
        "  K = F_T / W = 0.75 · (1 − e^(−0.3·Cn·i)) · (1.2 / Cn + 0.04)",
        "Wheel numeric:",
        "  Cn = Cl · B · D / W",
        "",
        "Traction efficiency (output / input):",
        "  TE = (F_T / W) / (Mt / (W·r)) = (1 − i) · (1 − ρ / χ)",
        "  χ = 0.75 · (1 − e^(−0.3·Cn·i))   (μ = χ assumed)",
        "",
        "Symbols:",
        "  i   : slip ratio",
        "  W   : vertical wheel load",
        "  Fr  : rolling resistance force",
        "  F_T : traction (drawbar) force",
        "  Mt  : wheel torque",
        "  r   : wheel radius",
        "  Cn  : ground-bearing (wheel numeric) coefficient",
        "  Cl  : cone index, B : tyre width, D : wheel diameter",
        "  ρ   : rolling resistance coefficient, μ : circumferential force coefficient",
        "  χ   : coefficient used in the TE expression",
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn fmt_te(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
