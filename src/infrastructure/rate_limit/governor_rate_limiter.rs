use crate::domain::shared::rate_limiter::RateLimiter;
use async_trait::async_trait;
use governor::{Quota, RateLimiter as GovernorLimiter};
use std::sync::Arc;
use std::time::Duration;

type Limiter = GovernorLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Process-wide shared token bucket gating detector calls to
/// `MONITORING_RPM_LIMIT` requests per 60 seconds.
///
/// Built on `governor` (the same GCRA limiter `tower_governor` wraps for
/// inbound request throttling elsewhere in this family of services),
/// applied here to an outbound call instead of an inbound one.
pub struct GovernorRateLimiter {
    inner: Arc<Limiter>,
}

impl GovernorRateLimiter {
    pub fn new(rpm: u32) -> Self {
        // `Quota::per_minute` sets `max_burst` to `rpm`, so a fresh or
        // long-idle limiter would release up to `rpm` calls instantly and
        // then keep refilling on top of that. `with_period` defaults to
        // burst 1, which is what bounds calls to `rpm` over any rolling
        // 60-second window.
        let period = Duration::from_secs_f64(60.0 / rpm.max(1) as f64);
        let quota = Quota::with_period(period).expect("period is always positive");
        Self {
            inner: Arc::new(GovernorLimiter::direct(quota)),
        }
    }
}

#[async_trait]
impl RateLimiter for GovernorRateLimiter {
    async fn acquire(&self) {
        self.inner.until_ready().await;
    }
}
