use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clients::gateway::DiagnosticQuestion;
use crate::entities::search_queries;
use crate::search::SearchResultBundle;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    /// Keyword echo, truncated to the configured display limit.
    pub keywords: Vec<String>,
    pub results: SearchResultBundle,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub query: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    /// Empty when clarification is unavailable; the caller should search
    /// directly (or `skip`) in that case.
    pub questions: Vec<DiagnosticQuestion>,
    pub clarification_available: bool,
    /// Set only on gateway failure, never on the no-questions-needed case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct SearchQueryDto {
    pub id: i32,
    pub original_query: String,
    pub translated_keywords: Vec<String>,
    pub search_count: i32,
    pub has_results: Option<bool>,
    pub last_searched_at: Option<String>,
    pub created_at: String,
}

impl From<search_queries::Model> for SearchQueryDto {
    fn from(model: search_queries::Model) -> Self {
        let translated_keywords = model
            .translated_keywords
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default();

        Self {
            id: model.id,
            original_query: model.original_query,
            translated_keywords,
            search_count: model.search_count,
            has_results: model.has_results,
            last_searched_at: model.last_searched_at,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProblemRequest {
    pub problem_code: String,
    pub problem_name: String,
    pub description: Option<String>,
    pub severity_level: String,
    pub system_category: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<u64>,
}
