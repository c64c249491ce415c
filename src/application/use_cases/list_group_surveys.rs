use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::SurveyGroupRepository;
use crate::domain::{DomainError, Survey, SurveyGroup};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSurveys {
    pub group: SurveyGroup,
    pub surveys: Vec<Survey>,
}

/// Use case for walking the group → surveys relation.
pub struct ListGroupSurveysUseCase {
    groups: Arc<dyn SurveyGroupRepository>,
}

impl ListGroupSurveysUseCase {
    pub fn new(groups: Arc<dyn SurveyGroupRepository>) -> Self {
        Self { groups }
    }

    pub async fn execute(&self, group_id: i64) -> Result<GroupSurveys, DomainError> {
        let group = self
            .groups
            .find_group(group_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Survey group not found: {}", group_id))
            })?;

        let surveys = self.groups.surveys_in_group(group_id).await?;

        Ok(GroupSurveys { group, surveys })
    }
}
