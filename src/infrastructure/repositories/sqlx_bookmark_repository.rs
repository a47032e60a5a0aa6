use crate::domain::bookmark::{entity::Bookmark, repository::BookmarkRepository};
use crate::domain::monitoring::errors::DomainError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

pub struct SqlxBookmarkRepository {
    pool: PgPool,
}

impl SqlxBookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for SqlxBookmarkRepository {
    #[instrument(skip(self))]
    async fn find_active(&self) -> Result<Vec<Bookmark>, DomainError> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            "SELECT id, user_id, type, target_value, display_name, \
             email_notification_enabled AS email_enabled, \
             sms_notification_enabled AS sms_enabled, \
             monitoring_active, created_at, updated_at \
             FROM bookmarks WHERE monitoring_active = true",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(bookmarks)
    }
}
