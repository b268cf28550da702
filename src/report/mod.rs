//! Reporting utilities: commentary and formatted terminal output.

pub mod commentary;
pub mod format;

pub use commentary::*;
pub use format::*;
