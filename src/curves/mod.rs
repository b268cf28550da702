//! Comparison curve sets (`Cn+10, Cn, Cn-10, Cn-20`).

pub mod builder;

pub use builder::*;
