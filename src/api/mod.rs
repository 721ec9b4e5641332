use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{SessionRegistry, SharedState};

mod analytics;
mod catalog;
mod error;
mod observability;
mod search;
mod sessions;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn search(&self) -> &Arc<crate::search::FederatedSearch> {
        &self.shared.search
    }

    #[must_use]
    pub fn analytics(&self) -> &crate::search::AnalyticsRecorder {
        &self.shared.analytics
    }

    #[must_use]
    pub fn gateway(&self) -> &Arc<crate::clients::gateway::GatewayClient> {
        &self.shared.gateway
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.shared.sessions
    }
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::build(config).await?);
    Ok(create_app_state(shared, prometheus_handle).await)
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state
        .config()
        .read()
        .await
        .server
        .cors_allowed_origins
        .clone();

    let api_router = Router::new()
        .route("/search", post(search::run_search))
        .route("/search/keywords", post(search::preview_keywords))
        .route("/sessions", post(sessions::create_session))
        .route("/sessions/{id}/answers", put(sessions::set_answer))
        .route("/sessions/{id}/proceed", post(sessions::proceed_with_search))
        .route("/sessions/{id}/skip", post(sessions::skip_questions))
        .route("/sessions/{id}", delete(sessions::delete_session))
        .route("/analytics/popular", get(analytics::popular_queries))
        .route("/analytics/gaps", get(analytics::no_result_gaps))
        .route("/analytics/{id}", delete(analytics::delete_query))
        .route("/problems", get(catalog::list_problems))
        .route("/problems", post(catalog::create_problem))
        .route("/problems/{id}", get(catalog::get_problem))
        .route("/problems/{id}", put(catalog::update_problem))
        .route("/problems/{id}", delete(catalog::delete_problem))
        .route("/system/status", get(system::get_status))
        .route("/system/health", get(system::get_health))
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
