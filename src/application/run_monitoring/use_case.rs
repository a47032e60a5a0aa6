use super::dto::RunSummary;
use super::errors::CoordinatorError;
use crate::application::process_bookmark::use_case::ProcessBookmarkUseCase;
use crate::domain::bookmark::repository::BookmarkRepository;
use crate::domain::shared::lock::DistributedLock;
use redis::AsyncCommands;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, instrument};

pub struct RunMonitoringConfig {
    pub lock_key: String,
    pub lock_ttl_seconds: u64,
    pub concurrency_limit: usize,
}

/// Run coordinator. One external "run" call drives the whole pipeline;
/// there is no standing scheduler inside the core.
pub struct RunMonitoringUseCase {
    redis: redis::Client,
    lock: Arc<dyn DistributedLock>,
    bookmarks: Arc<dyn BookmarkRepository>,
    worker: Arc<ProcessBookmarkUseCase>,
    config: RunMonitoringConfig,
}

impl RunMonitoringUseCase {
    pub fn new(
        redis: redis::Client,
        lock: Arc<dyn DistributedLock>,
        bookmarks: Arc<dyn BookmarkRepository>,
        worker: Arc<ProcessBookmarkUseCase>,
        config: RunMonitoringConfig,
    ) -> Self {
        Self {
            redis,
            lock,
            bookmarks,
            worker,
            config,
        }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<RunSummary, CoordinatorError> {
        // Step 1: Redis must be reachable before we even try to lock.
        let mut conn = self
            .redis
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CoordinatorError::ServiceUnavailable(e.to_string()))?;
        let _: String = conn
            .ping()
            .await
            .map_err(|e| CoordinatorError::ServiceUnavailable(e.to_string()))?;

        // Single-flight lock: only one run proceeds at a time.
        let token = match self
            .lock
            .acquire(&self.config.lock_key, self.config.lock_ttl_seconds)
            .await
        {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!("another monitoring run already holds the lock");
                return Ok(RunSummary::already_running());
            }
            Err(e) => {
                return Err(CoordinatorError::ServiceUnavailable(e.to_string()));
            }
        };

        info!("distributed lock acquired, starting monitoring run");

        // Steps 3-8 always release the lock on the way out, success or not.
        let result = self.run_locked().await;

        if let Err(e) = self.lock.release(&self.config.lock_key, &token).await {
            error!(error = %e, "lock release failed (will rely on TTL expiry)");
        } else {
            info!("distributed lock released");
        }

        result
    }

    async fn run_locked(&self) -> Result<RunSummary, CoordinatorError> {
        // Step 3: load active bookmarks.
        let bookmarks = self
            .bookmarks
            .find_active()
            .await
            .map_err(|e| CoordinatorError::ServiceUnavailable(e.to_string()))?;

        if bookmarks.is_empty() {
            info!("no active bookmarks to monitor");
            return Ok(RunSummary::success(0, 0));
        }

        let monitored = bookmarks.len() as u32;
        info!(monitored, "fanning out to per-bookmark workers");

        // Bounded concurrency across the fan-out.
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit));

        // Step 5-6: launch and await every worker, counting exceptions as
        // failure (they never abort the run).
        let mut handles = Vec::with_capacity(bookmarks.len());
        for bookmark in bookmarks {
            let semaphore = semaphore.clone();
            let worker = self.worker.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore is never closed during a run");
                let bookmark_id = bookmark.id;
                (bookmark_id, worker.process(&bookmark).await)
            }));
        }

        let mut updates_found = 0u32;
        for handle in handles {
            match handle.await {
                Ok((_bookmark_id, true)) => updates_found += 1,
                Ok((_bookmark_id, false)) => {}
                Err(join_err) => {
                    error!(error = %join_err, "per-bookmark worker task panicked");
                }
            }
        }

        info!(monitored, updates_found, "monitoring run complete");
        Ok(RunSummary::success(monitored, updates_found))
    }
}
