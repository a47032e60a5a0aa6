use super::entity::UpdateFeed;
use async_trait::async_trait;
use thiserror::Error;

/// Why a persist attempt produced no row. All three are expected paths,
/// not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistSkipReason {
    /// The detector returned an empty summary.
    EmptySummary,
    /// The bookmark's `monitoring_active` flipped false since load.
    BookmarkDeactivated,
    /// A feed row with identical `(user_id, target_value, content)` already
    /// exists.
    DuplicateContent,
}

#[derive(Debug, Clone)]
pub enum PersistOutcome {
    Inserted(UpdateFeed),
    Skipped(PersistSkipReason),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("database error persisting finding: {0}")]
    Database(String),
    #[error("bookmark {0} vanished before persist")]
    BookmarkMissing(i64),
}

/// Finding persister.
///
/// Implementations MUST run the whole check-and-insert sequence inside a
/// single, dedicated transaction opened fresh for this call — never the
/// coordinator's own session/tx.
#[async_trait]
pub trait FindingPersister: Send + Sync {
    async fn persist_if_novel(
        &self,
        bookmark_id: i64,
        summary: &str,
    ) -> Result<PersistOutcome, PersistError>;
}
