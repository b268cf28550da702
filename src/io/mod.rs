//! Input/output helpers.
//!
//! - curve JSON read/write (`curve`)
//! - sample exports (CSV) (`export`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
