use anyhow::Result;

use crate::cli::OutputFormat;
use crate::SurveyGroup;

use super::super::Container;

pub struct GroupsController<'a> {
    container: &'a Container,
}

impl<'a> GroupsController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self, format: OutputFormat) -> Result<String> {
        let use_case = self.container.list_groups_use_case();
        let groups = use_case.execute().await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&groups)?,
            OutputFormat::Text => self.format_group_list(&groups),
        })
    }

    fn format_group_list(&self, groups: &[SurveyGroup]) -> String {
        if groups.is_empty() {
            return "No survey groups.".to_string();
        }

        let mut output = "Survey groups:\n\n".to_string();
        for group in groups {
            output.push_str(&format!("  {}\n", group.summary()));
            if let Some(description) = group.description() {
                output.push_str(&format!("    {}\n", description));
            }
        }

        output
    }
}
