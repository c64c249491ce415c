use anyhow::Result;

use crate::cli::OutputFormat;
use crate::GroupVoteStatus;

use super::super::Container;

pub struct CheckController<'a> {
    container: &'a Container,
}

impl<'a> CheckController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn check(
        &self,
        group_id: i64,
        fingerprint: String,
        format: OutputFormat,
    ) -> Result<String> {
        let group = self.container.list_groups_use_case().get_by_id(group_id).await?;
        let checker = self.container.duplicate_vote_checker();
        let status = checker.status(&group, &fingerprint).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&status)?,
            OutputFormat::Text => self.format_status(group.name(), &fingerprint, &status),
        })
    }

    fn format_status(
        &self,
        group_name: &str,
        fingerprint: &str,
        status: &GroupVoteStatus,
    ) -> String {
        if !status.restrict_voting {
            return format!(
                "Group '{}' does not restrict voting; '{}' may vote.",
                group_name, fingerprint
            );
        }

        match &status.voted_survey {
            Some(survey) => format!(
                "'{}' already voted in group '{}': {}",
                fingerprint, group_name, survey
            ),
            None => format!("'{}' has not voted in group '{}'.", fingerprint, group_name),
        }
    }
}
