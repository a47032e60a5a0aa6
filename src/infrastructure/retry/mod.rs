use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Retry policy for detector calls. Backoff shape is a value, not a
/// hard-coded constant: the original source used
/// `wait_exponential(multiplier=1, min=2, max=10)`, which this struct's
/// `Default` reproduces, but any caller (tests included) can override it.
///
/// `multiplier` scales the whole exponential sequence (`base * 2^(n-1) *
/// multiplier`), matching `tenacity`'s own `multiplier` parameter; it is
/// not a per-attempt growth factor — growth is always base-2, same as
/// the source's `wait_exponential`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base: Duration,
    pub cap: Duration,
    pub multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base: Duration::from_secs(2),
            cap: Duration::from_secs(10),
            multiplier: 1.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let scaled =
            self.base.as_secs_f64() * self.multiplier * 2f64.powi(attempt as i32 - 1);
        let capped = scaled.min(self.cap.as_secs_f64()).max(self.base.as_secs_f64());
        let wait = if self.jitter {
            rand::thread_rng().gen_range(self.base.as_secs_f64()..=capped)
        } else {
            capped
        };
        Duration::from_secs_f64(wait)
    }
}

/// Runs `op` up to `policy.max_attempts` times. `is_retriable` decides
/// whether a given error gets another attempt; on the final exhausted
/// attempt, or on any non-retriable error, the error is returned
/// immediately.
///
/// The wrapper composes *outside* whatever rate limiter `op` itself waits
/// on — each attempt re-enters it, since `op` is re-invoked from scratch
/// every time.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: RetryPolicy,
    is_retriable: impl Fn(&E) -> bool,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= policy.max_attempts || !is_retriable(&err) {
                    return Err(err);
                }
                let wait = policy.backoff_for_attempt(attempt);
                debug!(attempt, wait_ms = wait.as_millis() as u64, "retrying after backoff");
                tokio::time::sleep(wait).await;
            }
        }
    }
}
