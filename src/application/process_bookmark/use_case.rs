use crate::domain::bookmark::entity::Bookmark;
use crate::domain::monitoring::detector::{DetectorError, DetectorOutcome, UpdateDetector};
use crate::domain::monitoring::enqueuer::NotificationEnqueuer;
use crate::domain::monitoring::persister::{FindingPersister, PersistOutcome};
use crate::domain::shared::rate_limiter::RateLimiter;
use crate::infrastructure::retry::{retry_with_backoff, RetryPolicy};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Per-bookmark worker. Composes the rate limiter, retry wrapper and
/// detector, then — only when an update is found — the persister and
/// enqueuer.
///
/// Holds no bookmark-specific state: one instance is shared by every
/// concurrent `process` call within a run.
pub struct ProcessBookmarkUseCase {
    rate_limiter: Arc<dyn RateLimiter>,
    detector: Arc<dyn UpdateDetector>,
    persister: Arc<dyn FindingPersister>,
    enqueuer: Arc<dyn NotificationEnqueuer>,
    retry_policy: RetryPolicy,
}

impl ProcessBookmarkUseCase {
    pub fn new(
        rate_limiter: Arc<dyn RateLimiter>,
        detector: Arc<dyn UpdateDetector>,
        persister: Arc<dyn FindingPersister>,
        enqueuer: Arc<dyn NotificationEnqueuer>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            rate_limiter,
            detector,
            persister,
            enqueuer,
            retry_policy,
        }
    }

    /// Runs the full check → detect → persist → enqueue sequence for one
    /// bookmark, under a semaphore permit already acquired by the caller
    /// (the coordinator owns the semaphore so it can size it once per
    /// run).
    #[instrument(skip(self, bookmark), fields(bookmark_id = bookmark.id, user_id = bookmark.user_id))]
    pub async fn process(&self, bookmark: &Bookmark) -> bool {
        let outcome = retry_with_backoff(
            self.retry_policy,
            DetectorError::is_retriable,
            || async { self.call_detector(bookmark).await },
        )
        .await;

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(DetectorError::RateLimited) => {
                warn!("detector call rate limited after retries exhausted");
                return false;
            }
            Err(DetectorError::Timeout) => {
                warn!("detector call timed out after retries exhausted");
                return false;
            }
            Err(e) => {
                error!(error = %e, "detector call failed");
                return false;
            }
        };

        match outcome {
            DetectorOutcome::NoUpdate => false,
            DetectorOutcome::UpdateFound { summary, .. } => {
                self.handle_update_found(bookmark, &summary).await
            }
        }
    }

    async fn call_detector(
        &self,
        bookmark: &Bookmark,
    ) -> Result<DetectorOutcome, DetectorError> {
        self.rate_limiter.acquire().await;
        self.detector.check(&bookmark.target_value).await
    }

    async fn handle_update_found(&self, bookmark: &Bookmark, summary: &str) -> bool {
        let persisted = match self.persister.persist_if_novel(bookmark.id, summary).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "persist failed");
                return false;
            }
        };

        let feed = match persisted {
            PersistOutcome::Inserted(feed) => feed,
            PersistOutcome::Skipped(reason) => {
                info!(?reason, "persist skipped");
                return false;
            }
        };

        let channels = bookmark.enabled_channels();
        if channels.is_empty() {
            return true;
        }

        match self
            .enqueuer
            .enqueue(bookmark.user_id, &bookmark.display_name, &channels, &feed)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                error!(
                    critical = true,
                    feed_id = feed.id,
                    error = %e,
                    "notification enqueue failed after feed commit"
                );
                false
            }
        }
    }
}
