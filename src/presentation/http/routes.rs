use super::{
    handlers::{health, monitoring},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{Router, middleware, routing::{get, post}};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/monitoring/run", post(monitoring::run_monitoring))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
