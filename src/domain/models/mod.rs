mod dataset;
mod question;
mod survey;
mod survey_group;
mod vote;
mod voted_survey;

pub use dataset::*;
pub use question::*;
pub use survey::*;
pub use survey_group::*;
pub use vote::*;
pub use voted_survey::*;
