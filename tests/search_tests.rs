//! End-to-end search flow: translate, federated match, analytics.

mod common;

use axum::http::StatusCode;
use common::{json_request, seed_lean_mixture_problem, send, spawn_app, wait_for_analytics};
use serde_json::json;

#[tokio::test]
async fn dtc_search_finds_seeded_record() {
    let (state, app) = spawn_app().await;
    seed_lean_mixture_problem(&state).await;

    let (status, body) = send(&app, json_request("POST", "/api/search", json!({"query": "P0171"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let results = &body["data"]["results"];
    assert_eq!(results["has_results"], true);

    let dtc_codes = results["dtc_codes"].as_array().unwrap();
    assert!(
        dtc_codes.iter().any(|hit| hit["dtc_code"] == "P0171"),
        "expected P0171 in dtc group, got {dtc_codes:?}"
    );
    // The hit links back to its parent problem.
    assert!(dtc_codes[0]["problem"]["problem_code"].is_string());

    // Keyword echo carries both the raw token and the uppercased DTC.
    let keywords = body["data"]["keywords"].as_array().unwrap();
    assert!(keywords.contains(&json!("p0171")));
    assert!(keywords.contains(&json!("P0171")));
}

#[tokio::test]
async fn problem_group_is_eager_loaded() {
    let (state, app) = spawn_app().await;
    seed_lean_mixture_problem(&state).await;

    // "lean" appears in the problem description.
    let (status, body) = send(
        &app,
        json_request("POST", "/api/search", json!({"query": "engine lean"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let problems = body["data"]["results"]["problems"].as_array().unwrap();
    assert_eq!(problems.len(), 1);

    let problem = &problems[0];
    assert_eq!(problem["problem_code"], "PRB-0171");
    assert_eq!(problem["symptoms"].as_array().unwrap().len(), 1);
    assert_eq!(problem["dtc_codes"].as_array().unwrap().len(), 1);
    assert_eq!(problem["sensors"].as_array().unwrap().len(), 1);
    assert_eq!(problem["actuators"].as_array().unwrap().len(), 1);
    assert_eq!(problem["parts_factors"].as_array().unwrap().len(), 1);
    assert_eq!(problem["technical_theory"].as_array().unwrap().len(), 1);
    assert_eq!(problem["safety_precautions"].as_array().unwrap().len(), 1);
    assert_eq!(problem["cost_estimation"].as_array().unwrap().len(), 1);

    let solutions = problem["solutions"].as_array().unwrap();
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0]["tools"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn indonesian_complaint_matches_through_synonyms() {
    let (state, app) = spawn_app().await;
    seed_lean_mixture_problem(&state).await;

    // "brebet" expands to "misfire"/"brebet"; the seeded symptom text
    // contains "brebet".
    let (status, body) = send(
        &app,
        json_request("POST", "/api/search", json!({"query": "mobil brebet"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let symptoms = body["data"]["results"]["symptoms"].as_array().unwrap();
    assert!(!symptoms.is_empty());
    assert_eq!(body["data"]["results"]["has_results"], true);
}

#[tokio::test]
async fn nonsense_query_returns_empty_groups_and_records_gap() {
    let (state, app) = spawn_app().await;
    seed_lean_mixture_problem(&state).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/search", json!({"query": "xyzzyplugh frobnicate"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "no results is a success, not an error");
    let results = &body["data"]["results"];
    assert_eq!(results["has_results"], false);
    for group in ["problems", "symptoms", "dtc_codes", "sensors", "actuators"] {
        assert_eq!(results[group].as_array().unwrap().len(), 0, "group {group}");
    }

    // The gap surfaces to curators.
    let gaps = wait_for_analytics(&app, "/api/analytics/gaps", |data| {
        data.as_array()
            .is_some_and(|rows| rows.iter().any(|r| r["original_query"] == "xyzzyplugh frobnicate"))
    })
    .await;
    let row = gaps
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["original_query"] == "xyzzyplugh frobnicate")
        .unwrap()
        .clone();
    assert_eq!(row["has_results"], false);
    assert_eq!(row["search_count"], 1);
}

#[tokio::test]
async fn repeat_search_increments_count_case_insensitively() {
    let (state, app) = spawn_app().await;
    seed_lean_mixture_problem(&state).await;

    let (status, _) = send(&app, json_request("POST", "/api/search", json!({"query": "Mesin Brebet"}))).await;
    assert_eq!(status, StatusCode::OK);

    wait_for_analytics(&app, "/api/analytics/popular", |data| {
        data.as_array()
            .is_some_and(|rows| rows.iter().any(|r| r["original_query"] == "Mesin Brebet"))
    })
    .await;

    let (status, _) = send(&app, json_request("POST", "/api/search", json!({"query": "mesin brebet"}))).await;
    assert_eq!(status, StatusCode::OK);

    let popular = wait_for_analytics(&app, "/api/analytics/popular", |data| {
        data.as_array().is_some_and(|rows| {
            rows.iter()
                .any(|r| r["original_query"] == "Mesin Brebet" && r["search_count"] == 2)
        })
    })
    .await;

    // Still a single row: identity is the case-insensitive text.
    let matching: Vec<_> = popular
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| {
            r["original_query"]
                .as_str()
                .is_some_and(|q| q.eq_ignore_ascii_case("mesin brebet"))
        })
        .collect();
    assert_eq!(matching.len(), 1);
    assert!(matching[0]["last_searched_at"].is_string());
    assert!(
        matching[0]["translated_keywords"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("misfire"))
    );
}

#[tokio::test]
async fn blank_query_is_rejected() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(&app, json_request("POST", "/api/search", json!({"query": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn keyword_preview_does_not_touch_analytics() {
    let (_, app) = spawn_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/search/keywords", json!({"query": "mesin bergetar saat idle"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let keywords = body["data"]["keywords"].as_array().unwrap();
    for expected in ["mesin", "bergetar", "vibration", "engine"] {
        assert!(
            keywords.contains(&json!(expected)),
            "missing {expected} in {keywords:?}"
        );
    }

    // Previews never record; give a hypothetical stray write time to land
    // before asserting the view is still empty.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    let (status, body) = send(
        &app,
        axum::http::Request::builder()
            .uri("/api/analytics/popular")
            .body(axum::body::Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
