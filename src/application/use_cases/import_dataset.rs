use std::sync::Arc;

use crate::application::DatasetImporter;
use crate::domain::{DomainError, ImportSummary, SurveyDataset};

/// Use case for seeding a store from a [`SurveyDataset`].
pub struct ImportDatasetUseCase {
    importer: Arc<dyn DatasetImporter>,
}

impl ImportDatasetUseCase {
    pub fn new(importer: Arc<dyn DatasetImporter>) -> Self {
        Self { importer }
    }

    pub async fn execute(&self, dataset: &SurveyDataset) -> Result<ImportSummary, DomainError> {
        dataset.validate()?;

        if dataset.is_empty() {
            return Ok(ImportSummary::default());
        }

        self.importer.import(dataset).await
    }

    pub async fn execute_json(&self, json: &str) -> Result<ImportSummary, DomainError> {
        let dataset = SurveyDataset::from_json(json)?;
        self.execute(&dataset).await
    }
}
