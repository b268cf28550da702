//! Wismer–Luth (1974) wheel traction model.
//!
//! Models are implemented as small, pure functions so that search/curve code can
//! stay generic.

pub mod wismer_luth;

pub use wismer_luth::*;
