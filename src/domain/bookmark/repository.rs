use super::entity::Bookmark;
use crate::domain::monitoring::errors::DomainError;
use async_trait::async_trait;

/// Read-only access to bookmarks. The table is owned and written by another
/// service; the core never inserts, updates, or deletes a row here.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// All bookmarks with `monitoring_active = true`, for the run's initial
    /// load.
    async fn find_active(&self) -> Result<Vec<Bookmark>, DomainError>;
}
