use thiserror::Error;

/// Only these surface to the trigger surface's caller as a user-visible
/// failure; everything else is contained per-bookmark and only shows up
/// as a reduced `updates_found`.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("Redis is not available, cannot start monitoring job: {0}")]
    ServiceUnavailable(String),
}
