use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime_seconds: u64,
    pub database_ok: bool,
    pub gateway_enabled: bool,
}

pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let database_ok = state.store().ping().await.is_ok();

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        database_ok,
        gateway_enabled: state.gateway().enabled(),
    })))
}

pub async fn get_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<&'static str>>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::database(e))?;

    Ok(Json(ApiResponse::success("ok")))
}
