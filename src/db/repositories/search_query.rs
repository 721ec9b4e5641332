use anyhow::Result;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{prelude::*, search_queries};

/// Analytics rows keyed by the case-insensitive query text. This repository
/// is the only writer of `search_queries`.
pub struct SearchQueryRepository {
    conn: DatabaseConnection,
}

impl SearchQueryRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_text(&self, query: &str) -> Result<Option<search_queries::Model>> {
        Ok(SearchQueries::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(search_queries::Column::OriginalQuery)))
                    .eq(query.to_lowercase()),
            )
            .one(&self.conn)
            .await?)
    }

    /// Read-then-write upsert. Concurrent executions of the same text can
    /// undercount; analytics here are approximate, not billing-grade.
    pub async fn record(
        &self,
        query: &str,
        keywords: &[String],
        has_results: bool,
    ) -> Result<search_queries::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let keywords_json = serde_json::to_string(keywords)?;

        match self.find_by_text(query).await? {
            Some(existing) => {
                let count = existing.search_count;
                let mut model: search_queries::ActiveModel = existing.into();
                model.search_count = Set(count + 1);
                model.translated_keywords = Set(Some(keywords_json));
                model.has_results = Set(Some(has_results));
                model.last_searched_at = Set(Some(now));
                Ok(model.update(&self.conn).await?)
            }
            None => {
                let model = search_queries::ActiveModel {
                    original_query: Set(query.to_string()),
                    translated_keywords: Set(Some(keywords_json)),
                    search_count: Set(1),
                    has_results: Set(Some(has_results)),
                    last_searched_at: Set(Some(now.clone())),
                    created_at: Set(now),
                    ..Default::default()
                };
                Ok(model.insert(&self.conn).await?)
            }
        }
    }

    /// Most-searched queries, for the curation dashboard.
    pub async fn popular(&self, limit: u64) -> Result<Vec<search_queries::Model>> {
        Ok(SearchQueries::find()
            .order_by_desc(search_queries::Column::SearchCount)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    /// Queries whose latest execution found nothing, ordered by volume.
    /// These are the coverage gaps curators should fill first.
    pub async fn no_result_gaps(&self, limit: u64) -> Result<Vec<search_queries::Model>> {
        Ok(SearchQueries::find()
            .filter(search_queries::Column::HasResults.eq(false))
            .order_by_desc(search_queries::Column::SearchCount)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = SearchQueries::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
