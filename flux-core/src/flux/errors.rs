// flux/errors.rs

use thiserror::Error;

use crate::service::ServiceError;

/// Failure classes of a poll cycle. None of them is fatal: the cycle is
/// abandoned (or the single delivery dropped) and the next one starts fresh.
#[derive(Error, Debug)]
pub enum FluxError {
    #[error("Upstream unavailable: {0}")]
    FetchUnavailable(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Emission of {key} failed: {reason}")]
    EmissionFailed { key: String, reason: String },
}

impl From<ServiceError> for FluxError {
    fn from(err: ServiceError) -> Self {
        if err.is_transient() {
            FluxError::FetchUnavailable(err.to_string())
        } else {
            FluxError::FetchFailed(err.to_string())
        }
    }
}
