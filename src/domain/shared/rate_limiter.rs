use async_trait::async_trait;

/// Rate limiter. Gates only the detector call; callers suspend on
/// `acquire()` until a unit of capacity frees up. Must be safe to share
/// across concurrently running workers.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn acquire(&self);
}
