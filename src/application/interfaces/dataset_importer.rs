use async_trait::async_trait;

use crate::domain::{DomainError, ImportSummary, SurveyDataset};

/// Bulk loading of rows into a store.
///
/// Imports are all-or-nothing. Rows replace stored rows with the same id, and
/// a dangling survey → group, question → survey or vote → question reference
/// left anywhere in the store rejects the whole import with `InvalidArgument`.
#[async_trait]
pub trait DatasetImporter: Send + Sync {
    async fn import(&self, dataset: &SurveyDataset) -> Result<ImportSummary, DomainError>;
}
