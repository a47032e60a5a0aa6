use crate::domain::bookmark::entity::BookmarkType;
use crate::domain::monitoring::entity::{feed_title, FeedType, ImportanceLevel, TargetType, UpdateFeed};
use crate::domain::monitoring::persister::{
    FindingPersister, PersistError, PersistOutcome, PersistSkipReason,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{info, instrument, warn};

/// Finding persister backed by Postgres.
///
/// Every call opens its own transaction from the pool, never reusing the
/// coordinator's session, and runs freshness re-check, dedup check and
/// insert to completion before returning.
pub struct SqlxFindingPersister {
    pool: PgPool,
}

impl SqlxFindingPersister {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FindingPersister for SqlxFindingPersister {
    #[instrument(skip(self, summary), fields(bookmark_id))]
    async fn persist_if_novel(
        &self,
        bookmark_id: i64,
        summary: &str,
    ) -> Result<PersistOutcome, PersistError> {
        if summary.trim().is_empty() {
            return Ok(PersistOutcome::Skipped(PersistSkipReason::EmptySummary));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PersistError::Database(e.to_string()))?;

        // Re-read freshness inside this transaction: the bookmark may have
        // been deactivated since the run's initial load.
        let row = sqlx::query(
            "SELECT user_id, type, target_value, display_name, monitoring_active \
             FROM bookmarks WHERE id = $1",
        )
        .bind(bookmark_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| PersistError::Database(e.to_string()))?;

        let Some(row) = row else {
            return Err(PersistError::BookmarkMissing(bookmark_id));
        };

        let monitoring_active: bool = row
            .try_get("monitoring_active")
            .map_err(|e| PersistError::Database(e.to_string()))?;
        if !monitoring_active {
            warn!(bookmark_id, "bookmark deactivated before persist, skipping");
            return Ok(PersistOutcome::Skipped(PersistSkipReason::BookmarkDeactivated));
        }

        let user_id: i64 = row
            .try_get("user_id")
            .map_err(|e| PersistError::Database(e.to_string()))?;
        let bookmark_type: BookmarkType = row
            .try_get("type")
            .map_err(|e| PersistError::Database(e.to_string()))?;
        let target_value: String = row
            .try_get("target_value")
            .map_err(|e| PersistError::Database(e.to_string()))?;
        let display_name: String = row
            .try_get("display_name")
            .map_err(|e| PersistError::Database(e.to_string()))?;

        // Dedup check: same user, target and content already recorded.
        let existing = sqlx::query(
            "SELECT 1 FROM update_feeds WHERE user_id = $1 AND target_value = $2 \
             AND content = $3 LIMIT 1",
        )
        .bind(user_id)
        .bind(&target_value)
        .bind(summary)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| PersistError::Database(e.to_string()))?;

        if existing.is_some() {
            info!(bookmark_id, "duplicate content, skipping feed insert");
            return Ok(PersistOutcome::Skipped(PersistSkipReason::DuplicateContent));
        }

        // Insert the finding and commit.
        let target_type: TargetType = bookmark_type.into();
        let inserted = sqlx::query_as::<_, UpdateFeed>(
            "INSERT INTO update_feeds \
             (user_id, feed_type, target_type, target_value, title, content, importance) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, user_id, feed_type, target_type, target_value, title, content, \
                       importance, created_at",
        )
        .bind(user_id)
        .bind(FeedType::PolicyUpdate)
        .bind(target_type)
        .bind(&target_value)
        .bind(feed_title(&display_name))
        .bind(summary)
        .bind(ImportanceLevel::Medium)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| PersistError::Database(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| PersistError::Database(e.to_string()))?;

        info!(bookmark_id, feed_id = inserted.id, "finding persisted");
        Ok(PersistOutcome::Inserted(inserted))
    }
}
