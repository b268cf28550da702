//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Axes are fixed: slip `i ∈ [0, 1]`, TE `∈ [0, 1]`. Samples that are undefined
//! or fall outside the TE window break the line instead of being clamped.
//!
//! Plot elements:
//! - comparison curves: `1`, `2`, `3`, ... (set order)
//! - selected curve: `#`, drawn last
//! - selected curve's maximum: `*`

use crate::domain::{CurveSet, PLOT_SLIP_MAX, PLOT_SLIP_MIN};

/// Fixed TE window.
pub const TE_AXIS_MIN: f64 = 0.0;
pub const TE_AXIS_MAX: f64 = 1.0;

const SELECTED_GLYPH: char = '#';
const MAXIMUM_GLYPH: char = '*';
const CURVE_GLYPHS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Render all curves of a set with a legend.
pub fn render_ascii_plot(set: &CurveSet, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let (x_min, x_max) = (PLOT_SLIP_MIN, PLOT_SLIP_MAX);
    let (y_min, y_max) = (TE_AXIS_MIN, TE_AXIS_MAX);

    let mut grid = vec![vec![' '; width]; height];
    let mut legend = Vec::with_capacity(set.len());

    // Comparison curves first so the selected one overlays them.
    let mut glyphs = CURVE_GLYPHS.iter().copied().cycle();
    for curve in set.curves().iter().filter(|c| !c.is_selected()) {
        let ch = glyphs.next().unwrap_or('?');
        let points: Vec<(f64, Option<f64>)> = curve.points().iter().map(|p| (p.slip, p.te)).collect();
        draw_curve(&mut grid, &points, x_min, x_max, y_min, y_max, ch, false);
        legend.push(format!("{ch} {}", curve.label()));
    }

    if let Some(curve) = set.selected() {
        let points: Vec<(f64, Option<f64>)> = curve.points().iter().map(|p| (p.slip, p.te)).collect();
        draw_curve(&mut grid, &points, x_min, x_max, y_min, y_max, SELECTED_GLYPH, true);

        let maximum = curve.maximum();
        if let Some(te) = maximum.usable_te().filter(|te| (y_min..=y_max).contains(te)) {
            let x = map_x(maximum.slip, x_min, x_max, width);
            let y = map_y(te, y_min, y_max, height);
            grid[y][x] = MAXIMUM_GLYPH;
        }
        legend.push(format!("{SELECTED_GLYPH} {} (selected, {MAXIMUM_GLYPH} = max)", curve.label()));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: slip=[{x_min:.2}, {x_max:.2}] | TE=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    for line in legend {
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

#[allow(clippy::too_many_arguments)]
fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, Option<f64>)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
    overwrite: bool,
) {
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let Some(y) = y.filter(|y| y.is_finite() && (y_min..=y_max).contains(y)) else {
            prev = None;
            continue;
        };
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, xx, yy, ch, overwrite),
            None => draw_line(grid, xx, yy, xx, yy, ch, overwrite),
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(
    grid: &mut [Vec<char>],
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    ch: char,
    overwrite: bool,
) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            let cell = &mut grid[y0 as usize][x0 as usize];
            if overwrite || *cell == ' ' {
                *cell = ch;
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{DEFAULT_OFFSETS, build_curve_set};
    use crate::domain::GroundCoefficient;

    fn cn(v: f64) -> GroundCoefficient {
        GroundCoefficient::new(v).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_single_curve() {
        let set = build_curve_set(cn(40.0), &[0.0], 6).unwrap();
        let txt = render_ascii_plot(&set, 11, 5);
        let expected = concat!(
            "Plot: slip=[0.00, 1.00] | TE=[0.00, 1.00]\n",
            "\n",
            " *#\n",
            "   ##\n",
            "     ####\n",
            "         ##\n",
            "# Cn = 40 (selected, * = max)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn legend_lists_every_curve() {
        let set = build_curve_set(cn(40.0), &DEFAULT_OFFSETS, 200).unwrap();
        let txt = render_ascii_plot(&set, 60, 20);
        assert!(txt.contains("1 Cn = 50\n"));
        assert!(txt.contains("2 Cn = 30\n"));
        assert!(txt.contains("3 Cn = 20\n"));
        assert!(txt.contains("# Cn = 40 (selected, * = max)\n"));
        assert_eq!(txt.matches(MAXIMUM_GLYPH).count(), 2); // grid + legend
    }

    #[test]
    fn plot_has_fixed_height() {
        let set = build_curve_set(cn(5.0), &DEFAULT_OFFSETS, 100).unwrap();
        let txt = render_ascii_plot(&set, 40, 12);
        // header + rows + legend (2 curves survive for Cn = 5)
        assert_eq!(txt.lines().count(), 1 + 12 + 2);
    }
}
