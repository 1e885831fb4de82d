use std::path::PathBuf;
use thiserror::Error;

/// The main error type for datafold operations.
#[derive(Debug, Error)]
pub enum DatafoldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid archive URL '{input}': {message}")]
    InvalidUrl { input: String, message: String },

    #[error("Failed to fetch '{url}': {message}")]
    Fetch { url: String, message: String },

    #[error("Failed to extract archive {archive}: {message}")]
    Extract { archive: PathBuf, message: String },

    #[error("Invalid dataset layout under {root}: {message}")]
    Layout { root: PathBuf, message: String },

    #[error("Failed to decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Position {position} is out of range for an index of length {len}")]
    OutOfRange { position: usize, len: usize },

    #[error("Dataset index over {root} is empty")]
    EmptyIndex { root: PathBuf },
}
