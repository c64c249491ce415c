use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::GroupVoteRepository;
use crate::domain::{DomainError, SurveyGroup, VotedSurvey};

/// Outcome of checking one fingerprint against one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVoteStatus {
    pub group_id: Option<i64>,
    pub restrict_voting: bool,
    pub already_voted: bool,
    pub voted_survey: Option<VotedSurvey>,
}

/// Detects whether an anonymous voter already took part in a restricted
/// survey group.
///
/// Detection is point-in-time only: two votes racing from the same
/// fingerprint can both pass the check before either is committed.
pub struct DuplicateVoteChecker {
    votes: Arc<dyn GroupVoteRepository>,
}

impl DuplicateVoteChecker {
    pub fn new(votes: Arc<dyn GroupVoteRepository>) -> Self {
        Self { votes }
    }

    /// Unrestricted groups never block revoting and are answered without
    /// touching the store.
    pub async fn has_voted_in_group(
        &self,
        group: &SurveyGroup,
        fingerprint: &str,
    ) -> Result<bool, DomainError> {
        if !group.restrict_voting() {
            return Ok(false);
        }

        let group_id = group.require_id()?;
        self.votes
            .has_valid_vote_in_group(group_id, fingerprint)
            .await
    }

    pub async fn get_voted_survey(
        &self,
        group: &SurveyGroup,
        fingerprint: &str,
    ) -> Result<Option<VotedSurvey>, DomainError> {
        if !group.restrict_voting() {
            return Ok(None);
        }

        let group_id = group.require_id()?;
        self.votes.find_voted_survey(group_id, fingerprint).await
    }

    /// Both answers from a single store query.
    pub async fn status(
        &self,
        group: &SurveyGroup,
        fingerprint: &str,
    ) -> Result<GroupVoteStatus, DomainError> {
        let voted_survey = self.get_voted_survey(group, fingerprint).await?;

        Ok(GroupVoteStatus {
            group_id: group.id(),
            restrict_voting: group.restrict_voting(),
            already_voted: voted_survey.is_some(),
            voted_survey,
        })
    }
}
