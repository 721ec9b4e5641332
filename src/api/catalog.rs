use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::db::{ProblemDetail, ProblemInput};
use crate::entities::problems;

use super::{ApiError, ApiResponse, AppState, ProblemRequest};

fn validate(request: &ProblemRequest) -> Result<ProblemInput, ApiError> {
    if request.problem_code.trim().is_empty() {
        return Err(ApiError::validation("Problem code must not be empty"));
    }
    if request.problem_name.trim().is_empty() {
        return Err(ApiError::validation("Problem name must not be empty"));
    }

    Ok(ProblemInput {
        problem_code: request.problem_code.trim().to_string(),
        problem_name: request.problem_name.trim().to_string(),
        description: request.description.clone(),
        severity_level: request.severity_level.clone(),
        system_category: request.system_category.clone(),
    })
}

pub async fn list_problems(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<problems::Model>>>, ApiError> {
    let problems = state.store().problems().list().await?;
    Ok(Json(ApiResponse::success(problems)))
}

/// Full detail as the search results render it: the problem plus every
/// child table.
pub async fn get_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ProblemDetail>>, ApiError> {
    let detail = state
        .store()
        .problems()
        .get_detail(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Problem", id))?;

    Ok(Json(ApiResponse::success(detail)))
}

pub async fn create_problem(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProblemRequest>,
) -> Result<Json<ApiResponse<problems::Model>>, ApiError> {
    let input = validate(&request)?;
    let created = state.store().problems().insert(input).await?;
    Ok(Json(ApiResponse::success(created)))
}

pub async fn update_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<ProblemRequest>,
) -> Result<Json<ApiResponse<problems::Model>>, ApiError> {
    let input = validate(&request)?;
    let updated = state
        .store()
        .problems()
        .update(id, input)
        .await?
        .ok_or_else(|| ApiError::not_found("Problem", id))?;

    Ok(Json(ApiResponse::success(updated)))
}

pub async fn delete_problem(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if state.store().problems().delete(id).await? {
        Ok(Json(ApiResponse::success(())))
    } else {
        Err(ApiError::not_found("Problem", id))
    }
}
