use crate::domain::bookmark::entity::NotificationChannel;
use crate::domain::monitoring::entity::UpdateFeed;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnqueueError {
    #[error("redis error enqueueing notification: {0}")]
    Redis(String),
}

/// Notification enqueuer. Called only after the referenced `UpdateFeed`
/// row has been durably committed.
///
/// For every requested channel, implementations MUST `HSET` the detail
/// hash before `LPUSH`-ing the task id onto that channel's queue: by the
/// time a consumer sees the id on the queue, its detail hash must
/// already exist.
#[async_trait]
pub trait NotificationEnqueuer: Send + Sync {
    async fn enqueue(
        &self,
        user_id: i64,
        display_name: &str,
        channels: &[NotificationChannel],
        feed: &UpdateFeed,
    ) -> Result<(), EnqueueError>;
}
