use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::ImportSummary;

use super::super::Container;

pub struct ImportController<'a> {
    container: &'a Container,
}

impl<'a> ImportController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn import(&self, file: PathBuf) -> Result<String> {
        let json = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read dataset {}", file.display()))?;

        info!("Importing dataset from {}", file.display());
        let use_case = self.container.import_use_case();
        let summary = use_case.execute_json(&json).await?;

        Ok(self.format_summary(&summary))
    }

    fn format_summary(&self, summary: &ImportSummary) -> String {
        format!(
            "Imported {} rows:\n  Groups:    {}\n  Surveys:   {}\n  Questions: {}\n  Votes:     {}",
            summary.total(),
            summary.survey_groups,
            summary.surveys,
            summary.questions,
            summary.votes
        )
    }
}
