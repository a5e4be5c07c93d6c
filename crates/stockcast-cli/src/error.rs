use stockcast_core::ApiError;
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockcast_core::ValidationError),

    #[error("{0}")]
    Api(ApiError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Validation(inner) => Self::Validation(inner),
            other => Self::Api(other),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Api(ApiError::Transport { .. }) => 4,
            Self::Api(_) => 3,
            Self::Serialization(_) => 5,
            Self::Io(_) => 10,
        }
    }
}
