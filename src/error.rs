//! Error types for maze construction, text parsing and configuration loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("Invalid maze dimensions {width}x{height}: both must be odd and at least 5")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid maze data: {reason}")]
    InvalidMazeData { reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
