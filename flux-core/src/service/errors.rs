// service/errors.rs

use thiserror::Error;

/// Errors raised by upstream services
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ServiceError {
    /// Transient conditions that are expected to clear up by the next poll.
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_) | ServiceError::RateLimited(_))
    }
}

// Convert from common error types
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ServiceError::Parse(err.to_string());
        }

        match err.status() {
            Some(status) if status == reqwest::StatusCode::TOO_MANY_REQUESTS => {
                ServiceError::RateLimited(err.to_string())
            }
            Some(status) if status.is_client_error() => ServiceError::Upstream(err.to_string()),
            _ => ServiceError::Unavailable(err.to_string()),
        }
    }
}
