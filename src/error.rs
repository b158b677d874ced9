//! Error type shared by the codec, pipeline and batch paths.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("failed to decode image: {0}")]
    Decode(String),
    #[error("failed to encode image: {0}")]
    Encode(String),
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    #[error("dimension mismatch: expected {expected} samples, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid settings: {0}")]
    Config(String),
    #[error("frame capture failed: {0}")]
    Capture(String),
    #[error("failed to write archive: {0}")]
    Archive(String),
}

impl From<zip::result::ZipError> for FilterError {
    fn from(err: zip::result::ZipError) -> Self {
        FilterError::Archive(err.to_string())
    }
}
