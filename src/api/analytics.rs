use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LimitQuery, SearchQueryDto};

const DEFAULT_VIEW_LIMIT: u64 = 50;

/// Most-searched queries, for curators watching what technicians look up.
pub async fn popular_queries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<SearchQueryDto>>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_VIEW_LIMIT);
    let rows = state.analytics().popular(limit).await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(SearchQueryDto::from).collect(),
    )))
}

/// Queries whose latest run found nothing: the knowledge-base gaps worth
/// filling first.
pub async fn no_result_gaps(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<SearchQueryDto>>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_VIEW_LIMIT);
    let rows = state.analytics().no_result_gaps(limit).await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(SearchQueryDto::from).collect(),
    )))
}

pub async fn delete_query(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if state.analytics().delete(id).await? {
        Ok(Json(ApiResponse::success(())))
    } else {
        Err(ApiError::not_found("Search query", id))
    }
}
