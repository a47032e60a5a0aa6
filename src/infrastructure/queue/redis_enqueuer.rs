use crate::domain::bookmark::entity::NotificationChannel;
use crate::domain::monitoring::enqueuer::{EnqueueError, NotificationEnqueuer};
use crate::domain::monitoring::entity::UpdateFeed;
use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tracing::{error, info};
use uuid::Uuid;

/// Notification enqueuer backed by Redis.
///
/// `queue_key_prefix`/`detail_key_prefix` come from
/// `MONITORING_NOTIFICATION_QUEUE_KEY_PREFIX` /
/// `MONITORING_NOTIFICATION_DETAIL_KEY_PREFIX`.
pub struct RedisNotificationEnqueuer {
    client: Client,
    queue_key_prefix: String,
    detail_key_prefix: String,
}

impl RedisNotificationEnqueuer {
    pub fn new(client: Client, queue_key_prefix: String, detail_key_prefix: String) -> Self {
        Self {
            client,
            queue_key_prefix,
            detail_key_prefix,
        }
    }
}

#[async_trait]
impl NotificationEnqueuer for RedisNotificationEnqueuer {
    async fn enqueue(
        &self,
        user_id: i64,
        display_name: &str,
        channels: &[NotificationChannel],
        feed: &UpdateFeed,
    ) -> Result<(), EnqueueError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| EnqueueError::Redis(e.to_string()))?;

        for channel in channels {
            let task_id = Uuid::new_v4().to_string();
            let detail_key = format!("{}{}", self.detail_key_prefix, task_id);
            let queue_key = format!("{}{}", self.queue_key_prefix, channel.as_str());
            let message = format!("'{}'에 새로운 업데이트가 있습니다!", display_name);

            // HSET before LPUSH: the detail hash must exist by the time
            // the task id becomes visible on the queue.
            let hset_result: redis::RedisResult<()> = conn
                .hset_multiple(
                    &detail_key,
                    &[
                        ("user_id", user_id.to_string()),
                        ("message", message),
                        ("type", channel.as_str().to_string()),
                        ("update_feed_id", feed.id.to_string()),
                        ("created_at", feed.created_at.to_rfc3339()),
                    ],
                )
                .await;

            if let Err(e) = hset_result {
                error!(
                    critical = true,
                    feed_id = feed.id,
                    user_id,
                    "failed to write notification detail hash after feed commit: {}",
                    e
                );
                return Err(EnqueueError::Redis(e.to_string()));
            }

            if let Err(e) = conn.lpush::<_, _, ()>(&queue_key, &task_id).await {
                error!(
                    critical = true,
                    feed_id = feed.id,
                    user_id,
                    "failed to push notification task after feed commit: {}",
                    e
                );
                return Err(EnqueueError::Redis(e.to_string()));
            }

            info!(
                feed_id = feed.id,
                channel = channel.as_str(),
                task_id,
                "notification task enqueued"
            );
        }

        Ok(())
    }
}
