mod helpers;

use axum::http::{Method, Request, StatusCode};
use helpers::{send, spawn_app};

#[tokio::test]
#[ignore = "requires a local Postgres and Redis instance"]
async fn health_check_reports_ok_when_dependencies_are_reachable() {
    let test_app = spawn_app(vec![], vec![]).await;

    let req = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = send(&test_app.app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}
