//! System, catalog and analytics endpoints.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{json_request, seed_lean_mixture_problem, send, spawn_app, wait_for_analytics};
use serde_json::json;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn status_reports_database_and_gateway() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, get("/api/system/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database_ok"], true);
    assert_eq!(body["data"]["gateway_enabled"], false);
    assert_eq!(body["data"]["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = send(&app, get("/api/system/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "ok");
}

#[tokio::test]
async fn problem_crud_lifecycle() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/problems",
            json!({
                "problem_code": "PRB-0300",
                "problem_name": "Random misfire",
                "description": "Misfire terdeteksi di beberapa silinder",
                "severity_level": "High",
                "system_category": "Ignition"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["problem_id"].as_i64().unwrap();

    let (status, body) = send(&app, get("/api/problems")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/problems/{id}"),
            json!({
                "problem_code": "PRB-0300",
                "problem_name": "Random misfire (multiple cylinders)",
                "description": "Misfire terdeteksi di beberapa silinder",
                "severity_level": "Critical",
                "system_category": "Ignition"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["severity_level"], "Critical");

    // Fresh problem has no child records yet.
    let (status, body) = send(&app, get(&format!("/api/problems/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["problem_name"],
        "Random misfire (multiple cylinders)"
    );
    assert_eq!(body["data"]["symptoms"].as_array().unwrap().len(), 0);
    assert_eq!(body["data"]["solutions"].as_array().unwrap().len(), 0);

    let (status, _) = send(&app, delete(&format!("/api/problems/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get(&format!("/api/problems/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, delete(&format!("/api/problems/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn problem_with_blank_name_is_rejected() {
    let (_, app) = spawn_app().await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/problems",
            json!({
                "problem_code": "PRB-0001",
                "problem_name": "   ",
                "severity_level": "Low",
                "system_category": "Engine"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn popular_view_orders_by_search_count() {
    let (state, app) = spawn_app().await;
    seed_lean_mixture_problem(&state).await;

    // Recording is detached; wait for each search to land before the next
    // repeat so the counts are deterministic.
    for (query, count) in [("mesin brebet", 1), ("mesin brebet", 2), ("oli bocor", 1)] {
        let (status, _) = send(
            &app,
            json_request("POST", "/api/search", json!({"query": query})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        wait_for_analytics(&app, "/api/analytics/popular", |rows| {
            rows.as_array().is_some_and(|rows| {
                rows.iter()
                    .any(|row| row["original_query"] == query && row["search_count"] == count)
            })
        })
        .await;
    }

    let data = wait_for_analytics(&app, "/api/analytics/popular", |rows| {
        rows.as_array().is_some_and(|rows| rows.len() == 2)
    })
    .await;

    assert_eq!(data[0]["original_query"], "mesin brebet");
    assert_eq!(data[1]["original_query"], "oli bocor");
}

#[tokio::test]
async fn analytics_row_can_be_deleted_once() {
    let (_, app) = spawn_app().await;

    let (status, _) = send(
        &app,
        json_request("POST", "/api/search", json!({"query": "kopling selip"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = wait_for_analytics(&app, "/api/analytics/gaps", |rows| {
        rows.as_array().is_some_and(|rows| rows.len() == 1)
    })
    .await;
    let id = data[0]["id"].as_i64().unwrap();

    let (status, _) = send(&app, delete(&format!("/api/analytics/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, delete(&format!("/api/analytics/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_renders_when_enabled() {
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let db_path =
        std::env::temp_dir().join(format!("montir-test-{}.db", uuid::Uuid::new_v4()));
    let mut config = montir::config::Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.observability.metrics_enabled = true;

    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("install recorder");
    let state = montir::api::create_app_state_from_config(config, Some(handle))
        .await
        .expect("app state");
    let app = montir::api::router(state).await;

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(std::str::from_utf8(&bytes).is_ok());
}
