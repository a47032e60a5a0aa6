use async_trait::async_trait;
use chrono::Utc;
use monitoring_core::application::process_bookmark::use_case::ProcessBookmarkUseCase;
use monitoring_core::domain::bookmark::entity::{Bookmark, BookmarkType, NotificationChannel};
use monitoring_core::domain::monitoring::detector::{
    DetectorError, DetectorOutcome, SourceRef, UpdateDetector,
};
use monitoring_core::domain::monitoring::enqueuer::{EnqueueError, NotificationEnqueuer};
use monitoring_core::domain::monitoring::entity::{
    FeedType, ImportanceLevel, TargetType, UpdateFeed,
};
use monitoring_core::domain::monitoring::persister::{
    FindingPersister, PersistError, PersistOutcome, PersistSkipReason,
};
use monitoring_core::domain::shared::rate_limiter::RateLimiter;
use monitoring_core::infrastructure::retry::RetryPolicy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct ImmediateLimiter;

#[async_trait]
impl RateLimiter for ImmediateLimiter {
    async fn acquire(&self) {}
}

/// Fails the first `failures_left` calls with a retriable error, then
/// always reports an update.
struct FlakyThenFoundDetector {
    failures_left: AtomicUsize,
}

#[async_trait]
impl UpdateDetector for FlakyThenFoundDetector {
    async fn check(&self, _target_value: &str) -> Result<DetectorOutcome, DetectorError> {
        if self.failures_left.load(Ordering::SeqCst) > 0 {
            self.failures_left.fetch_sub(1, Ordering::SeqCst);
            return Err(DetectorError::Timeout);
        }
        Ok(DetectorOutcome::UpdateFound {
            summary: "tariff raised to 12%".to_string(),
            sources: vec![SourceRef {
                title: "notice".to_string(),
                url: "https://example.test".to_string(),
                content: "...".to_string(),
                published_date: None,
            }],
        })
    }
}

struct AlwaysMalformedDetector;

#[async_trait]
impl UpdateDetector for AlwaysMalformedDetector {
    async fn check(&self, _target_value: &str) -> Result<DetectorOutcome, DetectorError> {
        Err(DetectorError::Malformed("unexpected shape".to_string()))
    }
}

struct AcceptingPersister;

#[async_trait]
impl FindingPersister for AcceptingPersister {
    async fn persist_if_novel(
        &self,
        bookmark_id: i64,
        summary: &str,
    ) -> Result<PersistOutcome, PersistError> {
        Ok(PersistOutcome::Inserted(UpdateFeed {
            id: 1,
            user_id: bookmark_id,
            feed_type: FeedType::PolicyUpdate,
            target_type: TargetType::HsCode,
            target_value: "8471.30".to_string(),
            title: "새로운 업데이트".to_string(),
            content: summary.to_string(),
            importance: ImportanceLevel::Medium,
            created_at: Utc::now(),
        }))
    }
}

struct SkippingPersister;

#[async_trait]
impl FindingPersister for SkippingPersister {
    async fn persist_if_novel(
        &self,
        _bookmark_id: i64,
        _summary: &str,
    ) -> Result<PersistOutcome, PersistError> {
        Ok(PersistOutcome::Skipped(PersistSkipReason::DuplicateContent))
    }
}

#[derive(Default)]
struct CountingEnqueuer {
    calls: AtomicUsize,
}

#[async_trait]
impl NotificationEnqueuer for CountingEnqueuer {
    async fn enqueue(
        &self,
        _user_id: i64,
        _display_name: &str,
        _channels: &[NotificationChannel],
        _feed: &UpdateFeed,
    ) -> Result<(), EnqueueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingEnqueuer;

#[async_trait]
impl NotificationEnqueuer for FailingEnqueuer {
    async fn enqueue(
        &self,
        _user_id: i64,
        _display_name: &str,
        _channels: &[NotificationChannel],
        _feed: &UpdateFeed,
    ) -> Result<(), EnqueueError> {
        Err(EnqueueError::Redis("connection reset".to_string()))
    }
}

fn bookmark() -> Bookmark {
    Bookmark {
        id: 7,
        user_id: 99,
        r#type: BookmarkType::HsCode,
        target_value: "8471.30".to_string(),
        display_name: "Laptops".to_string(),
        email_enabled: true,
        sms_enabled: false,
        monitoring_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base: std::time::Duration::from_millis(1),
        cap: std::time::Duration::from_millis(5),
        multiplier: 1.0,
        jitter: false,
    }
}

#[tokio::test]
async fn retries_transient_failures_then_persists_and_enqueues() {
    let enqueuer = Arc::new(CountingEnqueuer::default());
    let use_case = ProcessBookmarkUseCase::new(
        Arc::new(ImmediateLimiter),
        Arc::new(FlakyThenFoundDetector {
            failures_left: AtomicUsize::new(2),
        }),
        Arc::new(AcceptingPersister),
        enqueuer.clone(),
        fast_retry_policy(),
    );

    let found = use_case.process(&bookmark()).await;

    assert!(found);
    assert_eq!(enqueuer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_retriable_detector_error_short_circuits_without_persisting() {
    let enqueuer = Arc::new(CountingEnqueuer::default());
    let use_case = ProcessBookmarkUseCase::new(
        Arc::new(ImmediateLimiter),
        Arc::new(AlwaysMalformedDetector),
        Arc::new(AcceptingPersister),
        enqueuer.clone(),
        fast_retry_policy(),
    );

    let found = use_case.process(&bookmark()).await;

    assert!(!found);
    assert_eq!(enqueuer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_finding_is_skipped_without_enqueueing() {
    let enqueuer = Arc::new(CountingEnqueuer::default());
    let use_case = ProcessBookmarkUseCase::new(
        Arc::new(ImmediateLimiter),
        Arc::new(FlakyThenFoundDetector {
            failures_left: AtomicUsize::new(0),
        }),
        Arc::new(SkippingPersister),
        enqueuer.clone(),
        fast_retry_policy(),
    );

    let found = use_case.process(&bookmark()).await;

    assert!(!found);
    assert_eq!(enqueuer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn enqueue_failure_after_commit_is_reported_as_not_found() {
    let use_case = ProcessBookmarkUseCase::new(
        Arc::new(ImmediateLimiter),
        Arc::new(FlakyThenFoundDetector {
            failures_left: AtomicUsize::new(0),
        }),
        Arc::new(AcceptingPersister),
        Arc::new(FailingEnqueuer),
        fast_retry_policy(),
    );

    let found = use_case.process(&bookmark()).await;

    assert!(!found);
}
