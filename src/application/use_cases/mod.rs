mod duplicate_vote_checker;
mod import_dataset;
mod list_group_surveys;
mod list_survey_groups;

pub use duplicate_vote_checker::*;
pub use import_dataset::*;
pub use list_group_surveys::*;
pub use list_survey_groups::*;
