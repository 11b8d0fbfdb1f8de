//! subcombi - frequency statistics for co-occurring substitutions
//!
//! Reads records such as `(A12B,C34D)`, counts every substitution token and
//! every per-record combination of tokens, keeps the frequent ones and
//! produces ranked, normalized frequency tables ready for plotting and
//! serialization.

pub mod cli;
pub mod combination;
pub mod config;
pub mod counter;
pub mod error;
pub mod matrix;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod substitute;

pub use error::{CombiError, Result};
pub use pipeline::{calculate, calculate_from_reader, Frequencies, Thresholds};
