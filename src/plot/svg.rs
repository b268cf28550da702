//! Plotters-powered SVG chart of a curve set.
//!
//! The chart mirrors the terminal plot: slip on `[0, 1]`, TE on a fixed `[0, 1]`
//! window, the selected curve drawn with a heavier stroke and its maximum
//! annotated. Only samples with a defined TE inside the window are drawn; a gap
//! splits the curve into separate line segments.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::domain::{CurveSet, PLOT_SLIP_MAX, PLOT_SLIP_MIN};
use crate::error::AppError;
use crate::plot::ascii::{TE_AXIS_MAX, TE_AXIS_MIN};

/// Rendered image size in pixels.
pub const SVG_SIZE: (u32, u32) = (880, 480);

const SELECTED_STROKE: u32 = 3;
const OTHER_STROKE: u32 = 1;

/// Palette for comparison curves (set order); the selected curve is always black.
const PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

/// Write an SVG chart of `set` to `path`.
pub fn write_svg_chart(path: &Path, set: &CurveSet) -> Result<(), AppError> {
    draw_chart(path, set)
        .map_err(|e| AppError::new(2, format!("Failed to render SVG '{}': {e}", path.display())))
}

fn draw_chart(path: &Path, set: &CurveSet) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("TE(i) vs slip (i)", font(20.0))
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 48)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(PLOT_SLIP_MIN..PLOT_SLIP_MAX, TE_AXIS_MIN..TE_AXIS_MAX)?;

    chart
        .configure_mesh()
        .x_desc("slip i")
        .y_desc("TE")
        .x_labels(11)
        .y_labels(11)
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .label_style(font(14.0))
        .draw()?;

    let mut palette = PALETTE.iter().cycle();
    for curve in set.curves() {
        let (color, width) = if curve.is_selected() {
            (BLACK, SELECTED_STROKE)
        } else {
            (*palette.next().unwrap_or(&BLUE), OTHER_STROKE)
        };

        let segments = visible_segments(curve.points().iter().map(|p| (p.slip, p.te)));
        let mut labelled = false;
        for segment in segments {
            let series = chart.draw_series(LineSeries::new(segment, color.stroke_width(width)))?;
            // One legend entry per curve, attached to its first segment.
            if !labelled {
                series
                    .label(curve.label())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
                    });
                labelled = true;
            }
        }

        if curve.is_selected() {
            let maximum = curve.maximum();
            if let Some(te) = maximum.usable_te().filter(|te| (TE_AXIS_MIN..=TE_AXIS_MAX).contains(te)) {
                chart.draw_series(std::iter::once(Circle::new((maximum.slip, te), 4, color.filled())))?;
                chart.draw_series(std::iter::once(Text::new(
                    format!("{} (max {te:.3})", curve.label()),
                    ((maximum.slip + 0.04).min(0.75), (te + 0.06).min(0.95)),
                    font(14.0).color(&BLACK),
                )))?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK.mix(0.3))
        .label_font(font(14.0))
        .draw()?;

    root.present()?;
    Ok(())
}

fn font(size: f64) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
}

/// Split samples into runs of defined values inside the TE window.
fn visible_segments(points: impl Iterator<Item = (f64, Option<f64>)>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (x, y) in points {
        match y.filter(|y| y.is_finite() && (TE_AXIS_MIN..=TE_AXIS_MAX).contains(y)) {
            Some(y) => current.push((x, y)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
