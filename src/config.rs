//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard
//! `std::env::var`, following the 12-factor app methodology.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL`: PostgreSQL connection string
//! - `REDIS_URL`: Redis connection URL
//!
//! ## Optional (monitoring tuning)
//! - `DATABASE_MAX_CONNECTIONS` (default: 20)
//! - `MONITORING_JOB_LOCK_KEY` (default: "monitoring:job:lock")
//! - `MONITORING_JOB_LOCK_TIMEOUT` (default: 3600)
//! - `MONITORING_CONCURRENT_REQUESTS_LIMIT` (default: 5)
//! - `MONITORING_RPM_LIMIT` (default: 60)
//! - `MONITORING_NOTIFICATION_QUEUE_KEY_PREFIX` (default: "daily_notification:queue:")
//! - `MONITORING_NOTIFICATION_DETAIL_KEY_PREFIX` (default: "daily_notification:detail:")
//! - `MONITORING_DETECTOR_ENDPOINT` (default: "http://localhost:9000/detect")
//! - `MONITORING_DETECTOR_TIMEOUT_SECONDS` (default: 30)
//! - `HOST` (default: "0.0.0.0")
//! - `PORT` (default: 8000)

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,

    pub monitoring_job_lock_key: String,
    pub monitoring_job_lock_timeout: u64,
    pub monitoring_concurrent_requests_limit: usize,
    pub monitoring_rpm_limit: u32,
    pub monitoring_notification_queue_key_prefix: String,
    pub monitoring_notification_detail_key_prefix: String,
    pub monitoring_detector_endpoint: String,
    pub monitoring_detector_timeout_seconds: u64,

    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, or if a
    /// present variable fails to parse to its expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env_required("DATABASE_URL")?,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 20)?,
            redis_url: env_required("REDIS_URL")?,

            monitoring_job_lock_key: env_or(
                "MONITORING_JOB_LOCK_KEY",
                "monitoring:job:lock".to_string(),
            )?,
            monitoring_job_lock_timeout: env_or("MONITORING_JOB_LOCK_TIMEOUT", 3600)?,
            monitoring_concurrent_requests_limit: env_or(
                "MONITORING_CONCURRENT_REQUESTS_LIMIT",
                5,
            )?,
            monitoring_rpm_limit: env_or("MONITORING_RPM_LIMIT", 60)?,
            monitoring_notification_queue_key_prefix: env_or(
                "MONITORING_NOTIFICATION_QUEUE_KEY_PREFIX",
                "daily_notification:queue:".to_string(),
            )?,
            monitoring_notification_detail_key_prefix: env_or(
                "MONITORING_NOTIFICATION_DETAIL_KEY_PREFIX",
                "daily_notification:detail:".to_string(),
            )?,
            monitoring_detector_endpoint: env_or(
                "MONITORING_DETECTOR_ENDPOINT",
                "http://localhost:9000/detect".to_string(),
            )?,
            monitoring_detector_timeout_seconds: env_or(
                "MONITORING_DETECTOR_TIMEOUT_SECONDS",
                30,
            )?,

            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 8000)?,
        })
    }
}

/// Load a required environment variable.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key)
        .map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
