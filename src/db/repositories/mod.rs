pub mod lookup;
pub mod problem;
pub mod search_query;
