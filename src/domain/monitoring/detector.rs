use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single web source backing a detector's summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
    pub content: String,
    pub published_date: Option<String>,
}

/// The total output of a detector call for one identifier.
///
/// `UpdateFound` always carries a non-empty summary and at least one
/// source; `NoUpdate` carries neither. Error status is represented as
/// `Err(DetectorError)` rather than a third outcome variant, which lets
/// the retry wrapper distinguish retriable from terminal failure by
/// matching on the error type instead of inspecting a status field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DetectorOutcome {
    UpdateFound {
        summary: String,
        sources: Vec<SourceRef>,
    },
    NoUpdate,
}

/// Error taxonomy the core distinguishes. The detector implementation is
/// responsible for classifying its own failures into these kinds; the
/// core never guesses from error text.
#[derive(Debug, Error, Clone)]
pub enum DetectorError {
    #[error("detector call timed out")]
    Timeout,
    #[error("detector upstream rate limited")]
    RateLimited,
    #[error("detector returned malformed output: {0}")]
    Malformed(String),
    #[error("detector internal error: {0}")]
    Internal(String),
}

impl DetectorError {
    /// Whether the retry wrapper should attempt this call again.
    pub fn is_retriable(&self) -> bool {
        matches!(self, DetectorError::Timeout | DetectorError::RateLimited)
    }
}

/// The abstract "does anything material change for this identifier"
/// capability. Implementations live outside the core (an LLM with web
/// search, in the source system) — the core only depends on this trait.
#[async_trait]
pub trait UpdateDetector: Send + Sync {
    async fn check(&self, target_value: &str) -> Result<DetectorOutcome, DetectorError>;
}
