use anyhow::Result;
use tracing::warn;

use crate::db::Store;
use crate::entities::search_queries;

/// Best-effort persistence of executed searches. Sole writer of the
/// `search_queries` table; curation views read it back out.
#[derive(Clone)]
pub struct AnalyticsRecorder {
    store: Store,
}

impl AnalyticsRecorder {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// First execution of a query text inserts with count 1; repeats
    /// (case-insensitive) bump the counter and refresh keywords, hit status
    /// and timestamp to the latest derivation.
    pub async fn record(
        &self,
        query: &str,
        keywords: &[String],
        has_results: bool,
    ) -> Result<search_queries::Model> {
        metrics::counter!("montir_searches_total").increment(1);
        if !has_results {
            metrics::counter!("montir_searches_no_results_total").increment(1);
        }

        self.store
            .search_queries()
            .record(query, keywords, has_results)
            .await
    }

    /// Fire-and-forget variant for the search path: recording must never
    /// delay or fail a search, so it runs on its own task and failures only
    /// get a log line.
    pub fn record_detached(&self, query: String, keywords: Vec<String>, has_results: bool) {
        let recorder = self.clone();
        tokio::spawn(async move {
            if let Err(e) = recorder.record(&query, &keywords, has_results).await {
                warn!("failed to record search analytics for {query:?}: {e}");
            }
        });
    }

    pub async fn popular(&self, limit: u64) -> Result<Vec<search_queries::Model>> {
        self.store.search_queries().popular(limit).await
    }

    pub async fn no_result_gaps(&self, limit: u64) -> Result<Vec<search_queries::Model>> {
        self.store.search_queries().no_result_gaps(limit).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        self.store.search_queries().delete(id).await
    }
}
