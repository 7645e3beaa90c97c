use thiserror::Error;

/// Unified error type for linked-arrows
#[derive(Error, Debug)]
pub enum ArrowError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid dimensions: \"{0}\" (expected WIDTHxHEIGHT)")]
    InvalidDimensions(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type ArrowResult<T> = Result<T, ArrowError>;
