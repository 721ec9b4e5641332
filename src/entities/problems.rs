use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problems")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub problem_id: i32,
    pub problem_code: String,
    pub problem_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub severity_level: String,
    pub system_category: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::symptoms::Entity")]
    Symptoms,
    #[sea_orm(has_many = "super::dtc_codes::Entity")]
    DtcCodes,
    #[sea_orm(has_many = "super::sensors::Entity")]
    Sensors,
    #[sea_orm(has_many = "super::actuators::Entity")]
    Actuators,
    #[sea_orm(has_many = "super::solutions::Entity")]
    Solutions,
    #[sea_orm(has_many = "super::parts_factors::Entity")]
    PartsFactors,
    #[sea_orm(has_many = "super::technical_theory::Entity")]
    TechnicalTheory,
    #[sea_orm(has_many = "super::safety_precautions::Entity")]
    SafetyPrecautions,
    #[sea_orm(has_many = "super::cost_estimation::Entity")]
    CostEstimation,
}

impl Related<super::symptoms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Symptoms.def()
    }
}

impl Related<super::dtc_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DtcCodes.def()
    }
}

impl Related<super::sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sensors.def()
    }
}

impl Related<super::actuators::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actuators.def()
    }
}

impl Related<super::solutions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Solutions.def()
    }
}

impl Related<super::parts_factors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartsFactors.def()
    }
}

impl Related<super::technical_theory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TechnicalTheory.def()
    }
}

impl Related<super::safety_precautions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SafetyPrecautions.def()
    }
}

impl Related<super::cost_estimation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CostEstimation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
