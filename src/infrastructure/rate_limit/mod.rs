pub mod governor_rate_limiter;
