use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Out of memory")]
    OutOfMemory(#[from] TryReserveError),

    #[error("Illegal operation: {0}")]
    IllegalOperation(String),

    #[error("Invalid enum: {0}")]
    InvalidEnum(String),
}

pub type Result<T> = std::result::Result<T, ImageError>;
