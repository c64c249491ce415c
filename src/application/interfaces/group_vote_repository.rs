use async_trait::async_trait;

use crate::domain::{DomainError, VotedSurvey};

/// The duplicate-vote join: votes → questions → surveys, filtered by the
/// survey's group, the vote's fingerprint and the vote's validity flag.
#[async_trait]
pub trait GroupVoteRepository: Send + Sync {
    /// Whether any valid vote by `fingerprint` exists on a survey of the group.
    async fn has_valid_vote_in_group(
        &self,
        group_id: i64,
        fingerprint: &str,
    ) -> Result<bool, DomainError>;

    /// The survey of the first matching vote, ordered by vote id.
    async fn find_voted_survey(
        &self,
        group_id: i64,
        fingerprint: &str,
    ) -> Result<Option<VotedSurvey>, DomainError>;
}
