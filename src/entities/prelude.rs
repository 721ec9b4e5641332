pub use super::actuators::Entity as Actuators;
pub use super::cost_estimation::Entity as CostEstimation;
pub use super::dtc_codes::Entity as DtcCodes;
pub use super::parts_factors::Entity as PartsFactors;
pub use super::problems::Entity as Problems;
pub use super::safety_precautions::Entity as SafetyPrecautions;
pub use super::search_queries::Entity as SearchQueries;
pub use super::sensors::Entity as Sensors;
pub use super::solutions::Entity as Solutions;
pub use super::symptoms::Entity as Symptoms;
pub use super::technical_theory::Entity as TechnicalTheory;
pub use super::tools::Entity as Tools;
