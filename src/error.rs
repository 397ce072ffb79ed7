//! # Service Error Types
//!
//! Unified error handling for the Todoist client and the gateway binary.

use thiserror::Error;

/// Service operation result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error types for upstream calls, configuration, and startup
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Todoist API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid due date on task {task_id}: {value}")]
    InvalidDueDate { task_id: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// Create an API error from an upstream HTTP response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check whether the error indicates a broken upstream rather than a
    /// broken request (maps to HTTP 500 at the gateway boundary)
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ServiceError::Http(_)
                | ServiceError::Json(_)
                | ServiceError::Api { .. }
                | ServiceError::InvalidDueDate { .. }
        )
    }
}
