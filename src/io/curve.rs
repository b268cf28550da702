//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a run:
//! - the curve set (coefficients, sampled TE(i), cached maxima, selected flag)
//! - the feasibility verdict when the run had a target
//! - the commentary lines
//!
//! The schema is defined by `domain::CurveFile`. Undefined TE samples are
//! written as `null`. Reading re-checks every curve against the model and the
//! selection rule, so an edited file is rejected rather than plotted.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::domain::{CurveFile, CurveSet, FeasibilityResult};
use crate::error::AppError;

/// Assemble the file contents for an export.
pub fn curve_file(
    curve_set: &CurveSet,
    feasibility: Option<&FeasibilityResult>,
    commentary: &[String],
) -> CurveFile {
    CurveFile {
        tool: "te".to_string(),
        generated_at: Utc::now(),
        feasibility: feasibility.copied(),
        curve_set: curve_set.clone(),
        commentary: commentary.to_vec(),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(BufWriter::new(file), curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    info!(path = %path.display(), curves = curve.curve_set.len(), "wrote curve JSON");
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}
