use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Question, Survey, SurveyGroup, Vote};
use crate::domain::DomainError;

/// A bundle of rows used to seed a store, usually read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDataset {
    #[serde(default)]
    pub survey_groups: Vec<SurveyGroup>,
    #[serde(default)]
    pub surveys: Vec<Survey>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl SurveyDataset {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::invalid_argument(format!("Malformed dataset: {}", e)))
    }

    pub fn is_empty(&self) -> bool {
        self.survey_groups.is_empty()
            && self.surveys.is_empty()
            && self.questions.is_empty()
            && self.votes.is_empty()
    }

    /// Checks the rules that do not depend on what the store already holds:
    /// every group carries an identifier and identifiers are unique per relation.
    /// Cross-relation references are checked by the importing store.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut group_ids = HashSet::new();
        for group in &self.survey_groups {
            let id = group.require_id()?;
            if !group_ids.insert(id) {
                return Err(duplicate("survey group", id));
            }
        }

        ensure_unique("survey", self.surveys.iter().map(Survey::id))?;
        ensure_unique("question", self.questions.iter().map(Question::id))?;
        ensure_unique("vote", self.votes.iter().map(Vote::id))?;

        Ok(())
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            survey_groups: self.survey_groups.len(),
            surveys: self.surveys.len(),
            questions: self.questions.len(),
            votes: self.votes.len(),
        }
    }
}

fn ensure_unique(relation: &str, ids: impl Iterator<Item = i64>) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(duplicate(relation, id));
        }
    }
    Ok(())
}

fn duplicate(relation: &str, id: i64) -> DomainError {
    DomainError::invalid_argument(format!("Duplicate {} id {} in dataset", relation, id))
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub survey_groups: usize,
    pub surveys: usize,
    pub questions: usize,
    pub votes: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.survey_groups + self.surveys + self.questions + self.votes
    }
}
