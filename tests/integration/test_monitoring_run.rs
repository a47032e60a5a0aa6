mod helpers;

use axum::http::{Method, Request, StatusCode};
use helpers::{sample_bookmark, send, spawn_app};
use monitoring_core::application::run_monitoring::dto::{RunStatus, RunSummary};

fn run_request() -> Request<axum::body::Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/monitoring/run")
        .body(axum::body::Body::empty())
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a local Postgres and Redis instance"]
async fn run_with_no_active_bookmarks_reports_zero() {
    let test_app = spawn_app(vec![], vec![]).await;

    let res = send(&test_app.app, run_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let summary: RunSummary = helpers::read_json(res).await;
    assert_eq!(summary.status, RunStatus::Success);
    assert_eq!(summary.monitored_bookmarks, 0);
    assert_eq!(summary.updates_found, 0);
}

#[tokio::test]
#[ignore = "requires a local Postgres and Redis instance"]
async fn run_finds_updates_and_enqueues_notifications() {
    let bookmarks = vec![
        sample_bookmark(1, "8471.30"),
        sample_bookmark(2, "8517.12"),
    ];
    let test_app = spawn_app(bookmarks, vec!["8471.30".to_string()]).await;

    let res = send(&test_app.app, run_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let summary: RunSummary = helpers::read_json(res).await;
    assert_eq!(summary.status, RunStatus::Success);
    assert_eq!(summary.monitored_bookmarks, 2);
    assert_eq!(summary.updates_found, 1);
    assert_eq!(test_app.enqueuer.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a local Postgres and Redis instance"]
async fn concurrent_runs_only_let_one_through() {
    let bookmarks = vec![sample_bookmark(1, "8471.30")];
    let test_app = spawn_app(bookmarks, vec![]).await;

    let (first, second) = tokio::join!(
        send(&test_app.app, run_request()),
        send(&test_app.app, run_request()),
    );

    let statuses: Vec<RunStatus> = vec![
        helpers::read_json::<RunSummary>(first).await.status,
        helpers::read_json::<RunSummary>(second).await.status,
    ];
    assert!(statuses.contains(&RunStatus::Success));
}
