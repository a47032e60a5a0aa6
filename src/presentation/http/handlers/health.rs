use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    redis: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!("Health check failed: database unreachable: {}", e);
            "down"
        }
    };

    let redis_status = match state.redis.get_multiplexed_async_connection().await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!("Health check failed: redis unreachable: {}", e);
            "down"
        }
    };

    let healthy = db_status == "up" && redis_status == "up";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" },
        database: db_status,
        redis: redis_status,
        version: env!("CARGO_PKG_VERSION"),
    };

    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
