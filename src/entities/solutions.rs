use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solutions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub solution_id: i32,
    pub problem_id: i32,
    #[sea_orm(column_type = "Text")]
    pub solution_step: String,
    pub step_order: i32,
    pub difficulty_level: Option<String>,
    pub estimated_time: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub special_notes: Option<String>,
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
    #[sea_orm(has_many = "super::tools::Entity")]
    Tools,
}

impl Related<super::problems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problems.def()
    }
}

impl Related<super::tools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tools.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
