use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub tool_id: i32,
    pub solution_id: i32,
    pub tool_name: String,
    pub tool_category: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub tool_specification: Option<String>,
    pub is_mandatory: Option<bool>,
    pub alternative_tool: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::solutions::Entity",
        from = "Column::SolutionId",
        to = "super::solutions::Column::SolutionId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Solutions,
}

impl Related<super::solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Solutions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
