use anyhow::Result;

use crate::cli::OutputFormat;
use crate::GroupSurveys;

use super::super::Container;

pub struct SurveysController<'a> {
    container: &'a Container,
}

impl<'a> SurveysController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn list(&self, group_id: i64, format: OutputFormat) -> Result<String> {
        let use_case = self.container.group_surveys_use_case();
        let result = use_case.execute(group_id).await?;

        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&result)?,
            OutputFormat::Text => self.format_surveys(&result),
        })
    }

    fn format_surveys(&self, result: &GroupSurveys) -> String {
        let mut output = format!("{}\n", result.group.summary());

        if result.surveys.is_empty() {
            output.push_str("  No surveys in this group.");
            return output;
        }

        for survey in &result.surveys {
            output.push_str(&format!("  {}. {}\n", survey.id(), survey.title()));
        }

        output
    }
}
