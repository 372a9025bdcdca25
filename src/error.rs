use thiserror::Error;

pub type OverlayResult<T> = Result<T, OverlayError>;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("series length mismatch: expected {expected} points, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}
