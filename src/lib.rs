//! `te-curves` library crate.
//!
//! The binary (`te`) is a thin wrapper around this library so that:
//!
//! - the model, search and curve code is testable without spawning processes
//! - modules are reusable (e.g., a GUI front-end or notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod curves;
pub mod domain;
pub mod error;
pub mod io;
pub mod models;
pub mod plot;
pub mod report;
pub mod search;
