//! Model evaluation for the Wismer–Luth traction equations.
//!
//! - `chi(i, Cn) = 0.75 * (1 - exp(-0.3 * Cn * i))`  (circumferential force coefficient)
//! - `rho(Cn)    = 1.2 / Cn + 0.04`                  (rolling resistance coefficient)
//! - `TE(i, Cn)  = (1 - i) * (1 - rho / chi)`
//!
//! The efficiency uses `chi` for the torque term (`mu = chi`).

use crate::domain::GroundCoefficient;

/// Asymptotic value of `chi` as `Cn * i → ∞`.
pub const CHI_LIMIT: f64 = 0.75;

/// Exponent scale in `chi`.
const CHI_RATE: f64 = 0.3;

/// Numerator of the `1/Cn` term in `rho`.
const RHO_SCALE: f64 = 1.2;

/// Floor of `rho` as `Cn → ∞`.
pub const RHO_FLOOR: f64 = 0.04;

/// At or below this `chi` the efficiency is undefined (division by ~0).
pub const CHI_DEGENERATE: f64 = 1e-15;

/// Traction (circumferential force) coefficient.
pub fn chi(slip: f64, cn: GroundCoefficient) -> f64 {
    // 1 - exp(-x) computed as -expm1(-x) to keep precision for small Cn*i.
    CHI_LIMIT * -(-CHI_RATE * cn.get() * slip).exp_m1()
}

/// Rolling-resistance coefficient.
pub fn rho(cn: GroundCoefficient) -> f64 {
    RHO_SCALE / cn.get() + RHO_FLOOR
}

/// Traction efficiency at slip ratio `slip`.
///
/// Returns `None` when `chi <= 1e-15` (as `i → 0` or `Cn → 0`).
pub fn evaluate_te(slip: f64, cn: GroundCoefficient) -> Option<f64> {
    let c = chi(slip, cn);
    if c <= CHI_DEGENERATE {
        return None;
    }
    Some((1.0 - slip) * (1.0 - rho(cn) / c))
}

/// Collapse an undefined efficiency to `-inf` for plain-number consumers (CSV, plots).
pub fn or_sentinel(te: Option<f64>) -> f64 {
    te.unwrap_or(f64::NEG_INFINITY)
}
