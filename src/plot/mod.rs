//! Curve set rendering.
//!
//! - terminal plot with a fixed grid (`ascii`)
//! - SVG chart via Plotters (`svg`)

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
