pub mod prelude;

pub mod actuators;
pub mod cost_estimation;
pub mod dtc_codes;
pub mod parts_factors;
pub mod problems;
pub mod safety_precautions;
pub mod search_queries;
pub mod sensors;
pub mod solutions;
pub mod symptoms;
pub mod technical_theory;
pub mod tools;
