use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cost_estimation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub cost_id: i32,
    pub problem_id: i32,
    pub labor_cost: Option<f64>,
    pub part_cost_min: Option<f64>,
    pub part_cost_max: Option<f64>,
    pub total_cost_estimate: Option<f64>,
    pub currency: Option<String>,
    pub last_updated: Option<String>,
    pub created_at: String,
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
