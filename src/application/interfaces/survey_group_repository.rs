use async_trait::async_trait;

use crate::domain::{DomainError, Survey, SurveyGroup};

#[async_trait]
pub trait SurveyGroupRepository: Send + Sync {
    async fn find_group(&self, id: i64) -> Result<Option<SurveyGroup>, DomainError>;

    /// All groups ordered by name, then id.
    async fn list_groups(&self) -> Result<Vec<SurveyGroup>, DomainError>;

    /// Surveys belonging to the group, ordered by id.
    async fn surveys_in_group(&self, group_id: i64) -> Result<Vec<Survey>, DomainError>;
}
