use thiserror::Error;

/// Validation and contract errors exposed by `spymaster-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("timeout must be greater than zero milliseconds")]
    ZeroTimeout,
    #[error("invalid value '{value}' for {key}")]
    InvalidSetting { key: &'static str, value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] crate::backend::BackendError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
