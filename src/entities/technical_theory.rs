use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "technical_theory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub theory_id: i32,
    pub problem_id: i32,
    pub theory_title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub technical_explanation: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub system_operation: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub failure_mechanism: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub preventive_measures: Option<String>,
    pub reference_links: Option<String>,
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
