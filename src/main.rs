use monitoring_core::{
    application::{
        process_bookmark::use_case::ProcessBookmarkUseCase,
        run_monitoring::use_case::{RunMonitoringConfig, RunMonitoringUseCase},
    },
    config::Config,
    infrastructure::{
        database::pool::create_pool,
        detector::http_detector::HttpUpdateDetector,
        locking::redis_lock::RedisDistributedLock,
        queue::redis_enqueuer::RedisNotificationEnqueuer,
        rate_limit::governor_rate_limiter::GovernorRateLimiter,
        repositories::{
            sqlx_bookmark_repository::SqlxBookmarkRepository,
            sqlx_finding_persister::SqlxFindingPersister,
        },
        retry::RetryPolicy,
    },
    presentation::http::{routes::create_router, state::AppState},
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
        tracing_subscriber::EnvFilter::try_new("info,monitoring_core=debug,tower_http=debug")
    })?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;

    let lock = Arc::new(RedisDistributedLock::new(redis.clone()));
    let bookmarks = Arc::new(SqlxBookmarkRepository::new(db.clone()));
    let persister = Arc::new(SqlxFindingPersister::new(db.clone()));
    let enqueuer = Arc::new(RedisNotificationEnqueuer::new(
        redis.clone(),
        config.monitoring_notification_queue_key_prefix.clone(),
        config.monitoring_notification_detail_key_prefix.clone(),
    ));
    let rate_limiter = Arc::new(GovernorRateLimiter::new(config.monitoring_rpm_limit));
    let detector = Arc::new(HttpUpdateDetector::new(
        config.monitoring_detector_endpoint.clone(),
        Duration::from_secs(config.monitoring_detector_timeout_seconds),
    )?);

    let worker = Arc::new(ProcessBookmarkUseCase::new(
        rate_limiter,
        detector,
        persister,
        enqueuer,
        RetryPolicy::default(),
    ));

    let coordinator = Arc::new(RunMonitoringUseCase::new(
        redis.clone(),
        lock,
        bookmarks,
        worker,
        RunMonitoringConfig {
            lock_key: config.monitoring_job_lock_key.clone(),
            lock_ttl_seconds: config.monitoring_job_lock_timeout,
            concurrency_limit: config.monitoring_concurrent_requests_limit,
        },
    ));

    let state = AppState {
        db,
        redis,
        coordinator,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("monitoring core listening at {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
