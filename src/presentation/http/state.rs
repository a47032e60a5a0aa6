use crate::application::run_monitoring::use_case::RunMonitoringUseCase;
use crate::config::Config;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: redis::Client,
    pub coordinator: Arc<RunMonitoringUseCase>,
    pub config: Config,
}
