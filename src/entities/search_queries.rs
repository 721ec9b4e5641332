use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per distinct query text (case-insensitive). `translated_keywords`
/// holds the most recent keyword derivation as a JSON string array.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "search_queries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub original_query: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub translated_keywords: Option<String>,
    pub search_count: i32,
    pub has_results: Option<bool>,
    pub last_searched_at: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
