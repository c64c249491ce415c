pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    DatasetImporter, DuplicateVoteChecker, GroupSurveys, GroupVoteRepository, GroupVoteStatus,
    ImportDatasetUseCase, ListGroupSurveysUseCase, ListSurveyGroupsUseCase,
    SurveyGroupRepository,
};

pub use cli::{Commands, OutputFormat};

pub use connector::{DuckdbSurveyStore, InMemorySurveyStore};

pub use domain::{
    DomainError, ImportSummary, Question, Survey, SurveyDataset, SurveyGroup, Vote, VotedSurvey,
};
