//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the search/curve code
//! - exported to JSON/CSV
//! - reloaded later for plotting (`te plot`)

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::curves::SELECTION_TOLERANCE;
use crate::error::ModelError;
use crate::models::evaluate_te;

/// Lower bound of the slip range searched for the maximum.
///
/// TE is singular at `i = 0`, so the search starts just above it.
pub const SEARCH_SLIP_MIN: f64 = 1e-6;

/// Upper bound of the slip range searched for the maximum.
pub const SEARCH_SLIP_MAX: f64 = 0.90;

/// Slip range used for plotted curves.
pub const PLOT_SLIP_MIN: f64 = 0.0;
pub const PLOT_SLIP_MAX: f64 = 1.0;

/// Ground-bearing coefficient `Cn` (always finite and > 0).
///
/// `Cn` is a divisor in `rho` and sits inside the exponential of `chi`, so every
/// model entry point takes this type rather than a raw `f64`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct GroundCoefficient(f64);

impl GroundCoefficient {
    pub fn new(value: f64) -> Result<Self, ModelError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidCoefficient(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Apply an additive offset, returning `None` when the result is not positive.
    pub fn offset(self, delta: f64) -> Option<Self> {
        Self::new(self.0 + delta).ok()
    }

    /// Whether two coefficients denote the same curve.
    pub fn same_as(self, other: Self, tolerance: f64) -> bool {
        (self.0 - other.0).abs() < tolerance
    }
}

impl TryFrom<f64> for GroundCoefficient {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GroundCoefficient> for f64 {
    fn from(value: GroundCoefficient) -> Self {
        value.0
    }
}

impl fmt::Display for GroundCoefficient {
    /// Shortest representation (`40`, `12.5`), matching how users type it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target traction efficiency, strictly inside `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TargetEfficiency(f64);

impl TargetEfficiency {
    pub fn new(value: f64) -> Result<Self, ModelError> {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidTarget(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TargetEfficiency {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetEfficiency> for f64 {
    fn from(value: TargetEfficiency) -> Self {
        value.0
    }
}

/// One sample of a TE(i) curve.
///
/// `te` is `None` where the traction coefficient is numerically degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub slip: f64,
    pub te: Option<f64>,
}

/// Best sample of a grid search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Maximum {
    /// Slip ratio `i*` of the best sample.
    pub slip: f64,
    /// `TE*`; `None` means no usable optimum exists on the grid.
    pub te: Option<f64>,
}

impl Maximum {
    /// `TE*` when it is a real, finite value.
    pub fn usable_te(&self) -> Option<f64> {
        self.te.filter(|v| v.is_finite())
    }
}

/// Stored TE values must agree with a fresh evaluation to within this (relative above 1).
const STORED_TE_TOLERANCE: f64 = 1e-12;

/// One sampled TE(i) curve for a single coefficient.
///
/// Fields are private: a curve is built once by the curve builder, with its
/// maximum cached at construction, and only read afterwards. Deserialization
/// re-evaluates every stored value, so a loaded curve obeys the same rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveRecord")]
pub struct Curve {
    coefficient: GroundCoefficient,
    points: Vec<CurvePoint>,
    maximum: Maximum,
    selected: bool,
}

impl Curve {
    pub(crate) fn new(
        coefficient: GroundCoefficient,
        points: Vec<CurvePoint>,
        maximum: Maximum,
        selected: bool,
    ) -> Self {
        Self {
            coefficient,
            points,
            maximum,
            selected,
        }
    }

    pub fn coefficient(&self) -> GroundCoefficient {
        self.coefficient
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn maximum(&self) -> Maximum {
        self.maximum
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Human-readable label used in legends and tables.
    pub fn label(&self) -> String {
        format!("Cn = {}", self.coefficient)
    }
}

/// Unchecked on-disk form of a `Curve`.
#[derive(Deserialize)]
struct CurveRecord {
    coefficient: GroundCoefficient,
    points: Vec<CurvePoint>,
    maximum: Maximum,
    selected: bool,
}

impl TryFrom<CurveRecord> for Curve {
    type Error = ModelError;

    fn try_from(record: CurveRecord) -> Result<Self, Self::Error> {
        let cn = record.coefficient;
        let inconsistent = |reason| ModelError::InconsistentCurve { cn: cn.get(), reason };

        let m = record.maximum;
        if !(SEARCH_SLIP_MIN..=SEARCH_SLIP_MAX).contains(&m.slip) {
            return Err(inconsistent("maximum slip outside the search range"));
        }
        if !te_agrees(m.te, evaluate_te(m.slip, cn)) {
            return Err(inconsistent("maximum TE does not match its slip"));
        }
        for p in &record.points {
            if !(PLOT_SLIP_MIN..=PLOT_SLIP_MAX).contains(&p.slip) {
                return Err(inconsistent("sample slip outside [0, 1]"));
            }
            if !te_agrees(p.te, evaluate_te(p.slip, cn)) {
                return Err(inconsistent("sample TE does not match the model"));
            }
        }

        Ok(Curve::new(cn, record.points, m, record.selected))
    }
}

fn te_agrees(stored: Option<f64>, fresh: Option<f64>) -> bool {
    match (stored, fresh) {
        (None, None) => true,
        (Some(a), Some(b)) => (a - b).abs() <= STORED_TE_TOLERANCE * a.abs().max(1.0),
        _ => false,
    }
}

/// Ordered comparison curves for one request (`Cn+10, Cn, Cn-10, Cn-20` by default).
///
/// Only the first curve matching `requested` is selected; this also holds for
/// sets read back from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveSetRecord")]
pub struct CurveSet {
    requested: GroundCoefficient,
    curves: Vec<Curve>,
}

impl CurveSet {
    pub(crate) fn new(requested: GroundCoefficient, curves: Vec<Curve>) -> Self {
        Self { requested, curves }
    }

    pub fn requested(&self) -> GroundCoefficient {
        self.requested
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// The curve drawn for the requested coefficient, if it is present.
    pub fn selected(&self) -> Option<&Curve> {
        self.curves.iter().find(|c| c.is_selected())
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn coefficients(&self) -> Vec<f64> {
        self.curves.iter().map(|c| c.coefficient().get()).collect()
    }
}

/// Unchecked on-disk form of a `CurveSet`.
#[derive(Deserialize)]
struct CurveSetRecord {
    requested: GroundCoefficient,
    curves: Vec<Curve>,
}

impl TryFrom<CurveSetRecord> for CurveSet {
    type Error = ModelError;

    fn try_from(record: CurveSetRecord) -> Result<Self, Self::Error> {
        let expected = record
            .curves
            .iter()
            .position(|c| c.coefficient().same_as(record.requested, SELECTION_TOLERANCE));

        for (idx, curve) in record.curves.iter().enumerate() {
            if curve.is_selected() != (Some(idx) == expected) {
                return Err(ModelError::SelectionMismatch {
                    requested: record.requested.get(),
                    cn: curve.coefficient().get(),
                });
            }
        }

        Ok(CurveSet::new(record.requested, record.curves))
    }
}

/// Outcome of comparing a target TE with the reachable maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityResult {
    pub target: TargetEfficiency,
    pub coefficient: GroundCoefficient,
    /// `TE*` (`None` when the coefficient has no usable optimum).
    pub te_max: Option<f64>,
    /// `i*` at which `TE*` was found.
    pub slip_at_max: f64,
    pub achievable: bool,
    /// Signed `TE* - target` (`None` when `TE*` is undefined).
    pub margin: Option<f64>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `TE_*` environment values).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: TargetEfficiency,
    pub coefficient: GroundCoefficient,

    /// Grid points used by the maximum search.
    pub search_steps: usize,
    /// Samples per plotted curve.
    pub plot_samples: usize,
    /// Additive offsets producing the comparison curves.
    pub offsets: Vec<f64>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub export_svg: Option<PathBuf>,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    /// Present when the export came from a full run with a target.
    #[serde(default)]
    pub feasibility: Option<FeasibilityResult>,
    pub curve_set: CurveSet,
    #[serde(default)]
    pub commentary: Vec<String>,
}
