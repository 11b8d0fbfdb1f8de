//! Error types for the counting pipeline and its outputs

use thiserror::Error;

/// Errors that can occur while counting, filtering or writing results
#[derive(Error, Debug)]
pub enum CombiError {
    #[error("Unknown registry id: {0}")]
    UnknownId(usize),

    #[error("No records found in input (expected lines like \"(A1B,C2D)\")")]
    EmptyInput,

    #[error("Invalid figure size: {0:?} (expected WIDTHxHEIGHT, e.g. 20x20)")]
    InvalidFigureSize(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CombiError>;
