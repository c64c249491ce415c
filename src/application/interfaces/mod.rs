mod dataset_importer;
mod group_vote_repository;
mod survey_group_repository;

pub use dataset_importer::*;
pub use group_vote_repository::*;
pub use survey_group_repository::*;
