//! Maximum search and feasibility.
//!
//! Responsibilities:
//!
//! - generate the uniform slip grid
//! - evaluate TE on the grid (parallel) and pick the peak
//! - compare a target efficiency against that peak

pub mod feasibility;
pub mod grid;
pub mod maximum;

pub use feasibility::*;
pub use grid::*;
pub use maximum::*;
