//! Export sampled curves to CSV.
//!
//! Long format, one row per sample: `cn,selected,slip,te`. The export is meant to
//! be easy to consume in spreadsheets or plotting scripts; undefined TE values
//! are written as `-inf`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::domain::CurveSet;
use crate::error::AppError;
use crate::models::or_sentinel;

/// Write every sample of every curve to a CSV file.
pub fn write_samples_csv(path: &Path, set: &CurveSet) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_samples(file, set)?;
    info!(path = %path.display(), "wrote sample CSV");
    Ok(())
}

/// Write the samples of `set` as CSV into any writer.
pub fn write_samples<W: Write>(writer: W, set: &CurveSet) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(["cn", "selected", "slip", "te"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for curve in set.curves() {
        let cn = curve.coefficient().to_string();
        let selected = curve.is_selected().to_string();
        for p in curve.points() {
            let slip = format!("{:.6}", p.slip);
            let te = format!("{:.10}", or_sentinel(p.te));
            out.write_record([cn.as_str(), selected.as_str(), slip.as_str(), te.as_str()])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
        }
    }

    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::build_curve_set;
    use crate::domain::GroundCoefficient;

    #[test]
    fn long_format_rows() {
        let cn = GroundCoefficient::new(40.0).unwrap();
        let set = build_curve_set(cn, &[10.0, 0.0], 3).unwrap();

        let mut buf = Vec::new();
        write_samples(&mut buf, &set).unwrap();
        let txt = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = txt.lines().collect();

        assert_eq!(lines[0], "cn,selected,slip,te");
        assert_eq!(lines.len(), 1 + 2 * 3);
        assert_eq!(lines[1], "50,false,0.000000,-inf");
        assert_eq!(lines[4], "40,true,0.000000,-inf");
        assert_eq!(lines[6], "40,true,1.000000,0.0000000000");
    }
}
