use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("lock backend unavailable: {0}")]
    Unavailable(String),
}

/// An acquired lock's CAS token. Release only succeeds if the backend's
/// current holder still matches this token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockToken(pub String);

/// Distributed lock. Non-blocking acquire; idempotent, CAS-checked
/// release. Acquire returning `None` is the expected "already running"
/// path, not an error.
#[async_trait]
pub trait DistributedLock: Send + Sync {
    async fn acquire(&self, key: &str, ttl_seconds: u64) -> Result<Option<LockToken>, LockError>;

    /// Releases `key` only if its current value equals `token`. Always
    /// returns `Ok(())` on a mismatch or missing key — that is a benign
    /// "someone else already cleaned up" outcome, not a failure.
    async fn release(&self, key: &str, token: &LockToken) -> Result<(), LockError>;
}
