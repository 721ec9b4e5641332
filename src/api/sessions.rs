use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clients::gateway::GatewayError;
use crate::search::session::{FetchOutcome, QuestionSession};
use crate::search::KeywordSet;

use super::{
    AnswerRequest, ApiError, ApiResponse, AppState, SearchRequest, SearchResponse, SessionCreated,
};

/// Open a clarifying-question session for a query. The gateway fetch happens
/// inline and the session is registered only once it resolves, so the id
/// handed out always refers to an entry in the registry. A failed or empty
/// fetch just means the caller should search without clarification.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ApiResponse<SessionCreated>>, ApiError> {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return Err(ApiError::validation("Query must not be empty"));
    }

    let mut session = QuestionSession::new();
    let token = session.begin_fetch(&query);

    // Disabled gateway is the normal no-clarification path, not a failure.
    let result = if state.gateway().enabled() {
        state.gateway().generate_questions(&query).await
    } else {
        Err(GatewayError::Disabled)
    };

    let result = match result {
        Err(GatewayError::Disabled) => Ok(Vec::new()),
        other => other,
    };

    let outcome = session.complete_fetch(token, result);
    let questions = session.questions().to_vec();

    let session_id = Uuid::new_v4();
    let ttl = Duration::from_secs(state.config().read().await.search.session_ttl_seconds);
    {
        // Abandoned sessions never resolve themselves; this sweep is the
        // only thing that reclaims them.
        let mut sessions = state.sessions().write().await;
        sessions.retain(|_, s| !s.is_expired(ttl));
        sessions.insert(session_id, session);
    }

    let response = match outcome {
        FetchOutcome::QuestionsReady => SessionCreated {
            session_id,
            questions,
            clarification_available: true,
            warning: None,
        },
        FetchOutcome::Failed(message) => {
            metrics::counter!("montir_gateway_failures_total").increment(1);
            warn!("Question fetch failed for {query:?}: {message}");
            SessionCreated {
                session_id,
                questions: Vec::new(),
                clarification_available: false,
                warning: Some(message),
            }
        }
        FetchOutcome::NoQuestions | FetchOutcome::Superseded => SessionCreated {
            session_id,
            questions: Vec::new(),
            clarification_available: false,
            warning: None,
        },
    };

    Ok(Json(ApiResponse::success(response)))
}

pub async fn set_answer(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let mut sessions = state.sessions().write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| ApiError::not_found("Session", session_id))?;

    session.set_answer(&request.question_id, &request.value);
    Ok(Json(ApiResponse::success(())))
}

pub async fn proceed_with_search(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    resolve_and_search(&state, session_id, true).await
}

pub async fn skip_questions(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    resolve_and_search(&state, session_id, false).await
}

/// Reset: drop the session entirely. Idempotent; resetting an unknown or
/// already-resolved session is not an error.
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Json<ApiResponse<()>> {
    state.sessions().write().await.remove(&session_id);
    Json(ApiResponse::success(()))
}

/// Resolve the session into a keyword list (with or without answers), run
/// the federated search and record analytics against the original query
/// text. The session is discarded once resolved.
async fn resolve_and_search(
    state: &Arc<AppState>,
    session_id: Uuid,
    use_answers: bool,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let (query, keyword_list) = {
        let mut sessions = state.sessions().write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or_else(|| ApiError::not_found("Session", session_id))?;

        let keywords = if use_answers {
            session.proceed_with_search()
        } else {
            session.skip_questions()
        };
        let query = session.pending_query().to_string();
        sessions.remove(&session_id);
        (query, keywords)
    };

    let keywords = KeywordSet::from(keyword_list);
    if keywords.is_empty() {
        return Err(ApiError::validation(
            "Query contains no usable search terms",
        ));
    }

    info!(
        "Clarified search for {:?} ({} keywords, answers: {use_answers})",
        query,
        keywords.len()
    );

    let bundle = state
        .search()
        .execute(&keywords)
        .await
        .map_err(ApiError::search_failed)?;

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
