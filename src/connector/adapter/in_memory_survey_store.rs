use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{DatasetImporter, GroupVoteRepository, SurveyGroupRepository};
use crate::domain::{
    DomainError, ImportSummary, Question, Survey, SurveyDataset, SurveyGroup, Vote, VotedSurvey,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    groups: BTreeMap<i64, SurveyGroup>,
    surveys: BTreeMap<i64, Survey>,
    questions: BTreeMap<i64, Question>,
    votes: BTreeMap<i64, Vote>,
}

impl Tables {
    fn apply(&mut self, dataset: &SurveyDataset) -> Result<(), DomainError> {
        for group in &dataset.survey_groups {
            self.groups.insert(group.require_id()?, group.clone());
        }
        for survey in &dataset.surveys {
            self.surveys.insert(survey.id(), survey.clone());
        }
        for question in &dataset.questions {
            self.questions.insert(question.id(), question.clone());
        }
        for vote in &dataset.votes {
            self.votes.insert(vote.id(), vote.clone());
        }
        Ok(())
    }

    fn check_references(&self) -> Result<(), DomainError> {
        for survey in self.surveys.values() {
            if let Some(group_id) = survey.survey_group_id() {
                if !self.groups.contains_key(&group_id) {
                    return Err(dangling("survey", survey.id(), "survey group", group_id));
                }
            }
        }
        for question in self.questions.values() {
            if !self.surveys.contains_key(&question.survey_id()) {
                return Err(dangling("question", question.id(), "survey", question.survey_id()));
            }
        }
        for vote in self.votes.values() {
            if !self.questions.contains_key(&vote.question_id()) {
                return Err(dangling("vote", vote.id(), "question", vote.question_id()));
            }
        }
        Ok(())
    }

    /// Inner join vote → question → survey, in vote id order.
    fn surveys_voted_in<'a>(
        &'a self,
        group_id: i64,
        fingerprint: &'a str,
    ) -> impl Iterator<Item = &'a Survey> + 'a {
        self.votes
            .values()
            .filter(move |vote| vote.counts_for(fingerprint))
            .filter_map(move |vote| self.questions.get(&vote.question_id()))
            .filter_map(move |question| self.surveys.get(&question.survey_id()))
            .filter(move |survey| survey.belongs_to(group_id))
    }
}

fn dangling(relation: &str, id: i64, target: &str, target_id: i64) -> DomainError {
    DomainError::invalid_argument(format!(
        "{} {} references missing {} {}",
        relation, id, target, target_id
    ))
}

/// Survey store held entirely in process memory.
pub struct InMemorySurveyStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemorySurveyStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
        }
    }

    pub async fn from_dataset(dataset: SurveyDataset) -> Result<Self, DomainError> {
        let store = Self::new();
        store.import(&dataset).await?;
        Ok(store)
    }
}

impl Default for InMemorySurveyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupVoteRepository for InMemorySurveyStore {
    async fn has_valid_vote_in_group(
        &self,
        group_id: i64,
        fingerprint: &str,
    ) -> Result<bool, DomainError> {
        let tables = self.tables.lock().await;
        let found = tables.surveys_voted_in(group_id, fingerprint).next().is_some();
        Ok(found)
    }

    async fn find_voted_survey(
        &self,
        group_id: i64,
        fingerprint: &str,
    ) -> Result<Option<VotedSurvey>, DomainError> {
        let tables = self.tables.lock().await;
        let voted = tables
            .surveys_voted_in(group_id, fingerprint)
            .next()
            .map(|survey| VotedSurvey::new(survey.id(), survey.title()));
        Ok(voted)
    }
}

#[async_trait]
impl SurveyGroupRepository for InMemorySurveyStore {
    async fn find_group(&self, id: i64) -> Result<Option<SurveyGroup>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables.groups.get(&id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<SurveyGroup>, DomainError> {
        let tables = self.tables.lock().await;
        let mut groups: Vec<SurveyGroup> = tables.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        Ok(groups)
    }

    async fn surveys_in_group(&self, group_id: i64) -> Result<Vec<Survey>, DomainError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .surveys
            .values()
            .filter(|survey| survey.belongs_to(group_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DatasetImporter for InMemorySurveyStore {
    async fn import(&self, dataset: &SurveyDataset) -> Result<ImportSummary, DomainError> {
        dataset.validate()?;
        let mut tables = self.tables.lock().await;

        let mut staged = tables.clone();
        staged.apply(dataset)?;
        staged.check_references()?;
        *tables = staged;

        let summary = dataset.summary();
        debug!("Imported {} rows into memory", summary.total());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn council() -> SurveyDataset {
        SurveyDataset {
            survey_groups: vec![SurveyGroup::reconstitute(
                1,
                "Council".to_string(),
                None,
                true,
            )],
            surveys: vec![
                Survey::new(10, "Budget", Some(1)),
                Survey::new(11, "Parks", Some(1)),
            ],
            questions: vec![
                Question::new(100, 10, "Approve?"),
                Question::new(110, 11, "More trees?"),
            ],
            votes: vec![Vote::new(7, 110, "abc"), Vote::new(3, 100, "abc")],
        }
    }

    #[tokio::test]
    async fn first_match_is_lowest_vote_id() {
        let store = InMemorySurveyStore::from_dataset(council()).await.unwrap();

        let voted = store.find_voted_survey(1, "abc").await.unwrap();
        assert_eq!(voted, Some(VotedSurvey::new(10, "Budget")));
    }

    #[tokio::test]
    async fn join_queries_agree_through_trait_object() {
        let store: Arc<dyn GroupVoteRepository> =
            Arc::new(InMemorySurveyStore::from_dataset(council()).await.unwrap());

        for _ in 0..2 {
            assert!(store.has_valid_vote_in_group(1, "abc").await.unwrap());
            assert_eq!(
                store.find_voted_survey(1, "abc").await.unwrap(),
                Some(VotedSurvey::new(10, "Budget"))
            );
        }
        assert!(!store.has_valid_vote_in_group(1, "xyz").await.unwrap());
        assert_eq!(store.find_voted_survey(1, "xyz").await.unwrap(), None);
    }

    #[tokio::test]
    async fn survey_moved_out_of_group_stops_counting() {
        let store = InMemorySurveyStore::from_dataset(council()).await.unwrap();

        let moved = SurveyDataset {
            surveys: vec![Survey::new(10, "Budget", None), Survey::new(11, "Parks", None)],
            ..Default::default()
        };
        store.import(&moved).await.unwrap();

        assert!(!store.has_valid_vote_in_group(1, "abc").await.unwrap());
        assert_eq!(store.find_voted_survey(1, "abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn dangling_reference_leaves_store_untouched() {
        let store = InMemorySurveyStore::from_dataset(council()).await.unwrap();

        let broken = SurveyDataset {
            votes: vec![Vote::new(50, 999, "abc")],
            ..Default::default()
        };
        let err = store.import(&broken).await.unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(store.has_valid_vote_in_group(1, "abc").await.unwrap());
        let tables = store.tables.lock().await;
        assert!(!tables.votes.contains_key(&50));
    }

    #[tokio::test]
    async fn import_can_reference_rows_already_stored() {
        let store = InMemorySurveyStore::from_dataset(council()).await.unwrap();

        let more = SurveyDataset {
            votes: vec![Vote::new(8, 100, "late")],
            ..Default::default()
        };
        store.import(&more).await.unwrap();

        assert!(store.has_valid_vote_in_group(1, "late").await.unwrap());
    }

    #[tokio::test]
    async fn reimport_replaces_rows() {
        let store = InMemorySurveyStore::from_dataset(council()).await.unwrap();

        let retract = SurveyDataset {
            votes: vec![Vote::new(3, 100, "abc").invalidated()],
            ..Default::default()
        };
        store.import(&retract).await.unwrap();

        let voted = store.find_voted_survey(1, "abc").await.unwrap();
        assert_eq!(voted, Some(VotedSurvey::new(11, "Parks")));
    }

    #[tokio::test]
    async fn groups_are_listed_by_name() {
        let store = InMemorySurveyStore::from_dataset(SurveyDataset {
            survey_groups: vec![
                SurveyGroup::reconstitute(1, "b".to_string(), None, false),
                SurveyGroup::reconstitute(2, "a".to_string(), None, true),
            ],
            ..Default::default()
        })
        .await
        .unwrap();

        let names: Vec<String> = store
            .list_groups()
            .await
            .unwrap()
            .iter()
            .map(|g| g.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
