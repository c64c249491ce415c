use std::sync::Arc;

use crate::application::SurveyGroupRepository;
use crate::domain::{DomainError, SurveyGroup};

pub struct ListSurveyGroupsUseCase {
    groups: Arc<dyn SurveyGroupRepository>,
}

impl ListSurveyGroupsUseCase {
    pub fn new(groups: Arc<dyn SurveyGroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn execute(&self) -> Result<Vec<SurveyGroup>, DomainError> {
        self.groups.list_groups().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<SurveyGroup, DomainError> {
        self.groups
            .find_group(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Survey group not found: {}", id)))
    }
}
