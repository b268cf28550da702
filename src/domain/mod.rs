//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated inputs (`GroundCoefficient`, `TargetEfficiency`)
//! - search and curve outputs (`Maximum`, `Curve`, `CurveSet`, `FeasibilityResult`)
//! - run configuration (`RunConfig`) and the exported file schema (`CurveFile`)

pub mod types;

pub use types::*;
