use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parts_factors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub part_id: i32,
    pub problem_id: i32,
    pub component_name: String,
    pub component_type: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub failure_cause: Option<String>,
    pub wear_indicator: Option<String>,
    pub replacement_interval: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::problems::Entity",
        from = "Column::ProblemId",
        to = "super::problems::Column::ProblemId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Problems,
}

impl Related<super::problems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
