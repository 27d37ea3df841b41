use thiserror::Error;

/// Structured error types for the weather client
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Service is shut down and cannot be used")]
    ServiceShutDown,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Service already exists: {0}")]
    ServiceExists(String),

    #[error("Service not found: {0}")]
    ServiceNotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::TimeoutError(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn service_exists(message: impl Into<String>) -> Self {
        Self::ServiceExists(message.into())
    }

    pub fn service_not_found(message: impl Into<String>) -> Self {
        Self::ServiceNotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// Whether the error came out of talking to the remote weather API.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AppError::TimeoutError(_)
                | AppError::HttpError { .. }
                | AppError::NetworkError(_)
                | AppError::ParseError(_)
        )
    }

    /// Status code carried by a fetch failure: the upstream status for non-success
    /// responses, 500 for malformed payloads and 0 when no response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::HttpError { status, .. } => Some(*status),
            AppError::ParseError(_) => Some(500),
            AppError::TimeoutError(_) | AppError::NetworkError(_) => Some(0),
            _ => None,
        }
    }
}
