//! Shared helpers for integration tests: an app over a throwaway sqlite
//! file and a seeded slice of the knowledge base.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use montir::config::Config;
use montir::entities::{
    actuators, cost_estimation, dtc_codes, parts_factors, problems, safety_precautions, sensors,
    solutions, symptoms, technical_theory, tools,
};
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use tower::ServiceExt;

pub async fn spawn_app() -> (Arc<montir::api::AppState>, Router) {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(
    tweak: impl FnOnce(&mut Config),
) -> (Arc<montir::api::AppState>, Router) {
    let db_path = std::env::temp_dir().join(format!("montir-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    tweak(&mut config);

    let state = montir::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let router = montir::api::router(state.clone()).await;
    (state, router)
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Seed one fully populated problem: the P0171 lean-mixture case with a
/// symptom, DTC code, sensor, actuator, solution + tool and the advisory
/// child tables.
pub async fn seed_lean_mixture_problem(state: &montir::api::AppState) -> i32 {
    let conn = &state.store().conn;

    let problem = problems::ActiveModel {
        problem_code: Set("PRB-0171".to_string()),
        problem_name: Set("Campuran bahan bakar terlalu kurus".to_string()),
        description: Set(Some(
            "Engine running lean, fuel trim melebihi batas karena vacuum leak atau MAF kotor"
                .to_string(),
        )),
        severity_level: Set("High".to_string()),
        system_category: Set("Fuel".to_string()),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert problem");

    let problem_id = problem.problem_id;

    symptoms::ActiveModel {
        problem_id: Set(problem_id),
        symptom_description: Set("Mesin brebet saat akselerasi".to_string()),
        symptom_type: Set("Performance".to_string()),
        occurrence_condition: Set(Some("Saat idle dan akselerasi ringan".to_string())),
        frequency: Set(Some("Intermittent".to_string())),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert symptom");

    dtc_codes::ActiveModel {
        problem_id: Set(problem_id),
        dtc_code: Set("P0171".to_string()),
        dtc_description: Set(Some("System Too Lean (Bank 1)".to_string())),
        dtc_type: Set("Powertrain".to_string()),
        obd_standard: Set(Some("OBD-II".to_string())),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert dtc code");

    sensors::ActiveModel {
        problem_id: Set(problem_id),
        sensor_name: Set("MAF sensor".to_string()),
        sensor_location: Set(Some("Intake duct".to_string())),
        failure_mode: Set(Some("Kotor, pembacaan massa udara terlalu rendah".to_string())),
        testing_method: Set(Some("Live data: bandingkan g/s dengan spesifikasi".to_string())),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert sensor");

    actuators::ActiveModel {
        problem_id: Set(problem_id),
        actuator_name: Set("Fuel injector".to_string()),
        actuator_type: Set(Some("Solenoid".to_string())),
        failure_symptoms: Set(Some("Semprotan lemah, idle kasar".to_string())),
        testing_procedure: Set(Some("Ukur resistansi dan pola semprotan".to_string())),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert actuator");

    let solution = solutions::ActiveModel {
        problem_id: Set(problem_id),
        solution_step: Set("Periksa kebocoran vacuum dengan smoke test".to_string()),
        step_order: Set(1),
        difficulty_level: Set(Some("Medium".to_string())),
        estimated_time: Set(Some(45)),
        special_notes: Set(None),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert solution");

    tools::ActiveModel {
        solution_id: Set(solution.solution_id),
        tool_name: Set("Smoke machine".to_string()),
        tool_category: Set(Some("Diagnostic".to_string())),
        tool_specification: Set(None),
        is_mandatory: Set(Some(true)),
        alternative_tool: Set(Some("Carb cleaner spray".to_string())),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert tool");

    parts_factors::ActiveModel {
        problem_id: Set(problem_id),
        component_name: Set("Intake gasket".to_string()),
        component_type: Set(Some("Seal".to_string())),
        failure_cause: Set(Some("Getas karena panas".to_string())),
        wear_indicator: Set(None),
        replacement_interval: Set(None),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert part");

    technical_theory::ActiveModel {
        problem_id: Set(problem_id),
        theory_title: Set("Fuel trim dan campuran kurus".to_string()),
        technical_explanation: Set(Some(
            "ECU menambah durasi injeksi saat lambda membaca campuran kurus".to_string(),
        )),
        system_operation: Set(None),
        failure_mechanism: Set(None),
        preventive_measures: Set(None),
        reference_links: Set(None),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert theory");

    safety_precautions::ActiveModel {
        problem_id: Set(problem_id),
        safety_description: Set("Mesin panas: biarkan dingin sebelum membuka intake".to_string()),
        precaution_type: Set(Some("Thermal".to_string())),
        warning_level: Set(Some("Caution".to_string())),
        hazard_type: Set(None),
        ppe_required: Set(Some("Sarung tangan".to_string())),
        emergency_procedure: Set(None),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert safety");

    cost_estimation::ActiveModel {
        problem_id: Set(problem_id),
        labor_cost: Set(Some(150_000.0)),
        part_cost_min: Set(Some(50_000.0)),
        part_cost_max: Set(Some(250_000.0)),
        total_cost_estimate: Set(Some(400_000.0)),
        currency: Set(Some("IDR".to_string())),
        last_updated: Set(Some(now())),
        created_at: Set(now()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .expect("insert cost");

    problem_id
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Poll an analytics view until `predicate` accepts the rows or the
/// deadline passes. The recorder runs on a detached task, so a freshly
/// executed search may take a few milliseconds to land.
pub async fn wait_for_analytics<F>(app: &Router, uri: &str, predicate: F) -> serde_json::Value
where
    F: Fn(&serde_json::Value) -> bool,
{
    for _ in 0..50 {
        let (status, body) = send(
            app,
            Request::builder().uri(uri).body(Body::empty()).unwrap(),
        )
        .await;
        if status == StatusCode::OK && predicate(&body["data"]) {
            return body["data"].clone();
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
    panic!("analytics view {uri} never satisfied predicate");
}
