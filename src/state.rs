use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clients::gateway::GatewayClient;
use crate::config::Config;
use crate::db::Store;
use crate::search::{AnalyticsRecorder, FederatedSearch, QuestionSession};

/// Clarifying-question sessions keyed by id. Each session belongs to one
/// search flow; nothing here is shared across users beyond the map itself.
pub type SessionRegistry = Arc<RwLock<HashMap<Uuid, QuestionSession>>>;

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub gateway: Arc<GatewayClient>,

    pub search: Arc<FederatedSearch>,

    pub analytics: AnalyticsRecorder,

    pub sessions: SessionRegistry,
}

impl SharedState {
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let store = Store::new(&config.general.database_path).await?;

        let gateway = Arc::new(GatewayClient::new(config.gateway.clone()));
        let search = Arc::new(FederatedSearch::new(
            store.clone(),
            config.search.result_limit,
        ));
        let analytics = AnalyticsRecorder::new(store.clone());

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            gateway,
            search,
            analytics,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        })
    }
}
