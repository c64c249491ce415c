mod duckdb_survey_store;
mod in_memory_survey_store;

pub use duckdb_survey_store::*;
pub use in_memory_survey_store::*;
