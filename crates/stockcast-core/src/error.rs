use thiserror::Error;

/// Validation and contract errors exposed by `stockcast-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains whitespace or control character {ch:?} at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("quote payload is missing field '{field}'")]
    MissingQuoteField { field: &'static str },

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("timeout must be greater than zero milliseconds")]
    ZeroTimeout,
}

/// Failure surfaced by every API client call.
///
/// `Api` carries the backend's `error` field verbatim. `Transport` covers
/// everything that kept a well-formed answer from arriving: connect and
/// timeout failures, unreadable bodies, non-2xx statuses and bodies that do
/// not match the typed contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Api { message: String },

    #[error("{message}")]
    Transport { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Api { message } | Self::Transport { message } => message.clone(),
            Self::Validation(error) => error.to_string(),
        }
    }

    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Api { .. } => "api.error",
            Self::Transport { .. } => "api.transport",
            Self::Validation(_) => "api.validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message_verbatim() {
        let error = ApiError::api("No data found for XXXX.JK");
        assert_eq!(error.to_string(), "No data found for XXXX.JK");
        assert_eq!(error.code(), "api.error");
        assert!(!error.is_transport());
    }

    #[test]
    fn validation_converts_into_api_error() {
        let error: ApiError = ValidationError::EmptySymbol.into();
        assert_eq!(error.code(), "api.validation");
        assert_eq!(error.message(), "symbol cannot be empty");
    }
}
