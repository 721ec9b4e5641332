use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::info;

use crate::search::{KeywordSet, translate};

use super::{ApiError, ApiResponse, AppState, KeywordsResponse, SearchRequest, SearchResponse};

/// Validate the raw query and derive its keyword set. Shared by the direct
/// search path and the keyword preview endpoint.
fn derive_keywords(raw_query: &str) -> Result<(String, KeywordSet), ApiError> {
    let query = raw_query.trim();
    if query.is_empty() {
        return Err(ApiError::validation("Query must not be empty"));
    }

    let keywords = translate(query);
    if keywords.is_empty() {
        return Err(ApiError::validation(
            "Query contains no usable search terms",
        ));
    }

    Ok((query.to_string(), keywords))
}

pub async fn run_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let (query, keywords) = derive_keywords(&request.query)?;

    info!("Diagnostic search for {:?} ({} keywords)", query, keywords.len());

    let bundle = state
        .search()
        .execute(&keywords)
        .await
        .map_err(ApiError::search_failed)?;

    // Analytics are recorded off the response path; a recorder failure must
    // never turn a successful search into an error.
    state
        .analytics()
        .record_detached(query.clone(), keywords.as_slice().to_vec(), bundle.has_results);

    let display_limit = state.config().read().await.search.keyword_display_limit;
    let mut echoed: Vec<String> = keywords.into_vec();
    echoed.truncate(display_limit);

    Ok(Json(ApiResponse::success(SearchResponse {
        query,
        keywords: echoed,
        results: bundle,
    })))
}

pub async fn preview_keywords(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<KeywordsResponse>>, ApiError> {
    let (query, keywords) = derive_keywords(&request.query)?;

    let display_limit = state.config().read().await.search.keyword_display_limit;
    let mut echoed: Vec<String> = keywords.into_vec();
    echoed.truncate(display_limit);

    Ok(Json(ApiResponse::success(KeywordsResponse {
        query,
        keywords: echoed,
    })))
}
