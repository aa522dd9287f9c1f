use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] spymaster_core::ValidationError),

    #[error(transparent)]
    Backend(#[from] spymaster_core::BackendError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Backend(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) | Self::Logging(_) => 10,
        }
    }
}
