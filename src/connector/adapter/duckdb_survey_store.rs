use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use duckdb::{params, AccessMode, Config, Connection};
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::{DatasetImporter, GroupVoteRepository, SurveyGroupRepository};
use crate::domain::{DomainError, ImportSummary, Survey, SurveyDataset, SurveyGroup, VotedSurvey};

const VOTED_IN_GROUP_JOIN: &str = r#"
    FROM votes
    INNER JOIN questions ON votes.question_id = questions.id
    INNER JOIN surveys ON questions.survey_id = surveys.id
    WHERE surveys.survey_group_id = ?
      AND votes.fingerprint = ?
      AND votes.is_valid = TRUE
"#;

/// Survey store backed by a DuckDB database.
pub struct DuckdbSurveyStore {
    conn: Arc<Mutex<Connection>>,
}

impl DuckdbSurveyStore {
    pub fn new(db_path: &Path) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| {
            DomainError::store_unavailable(format!("Failed to open DuckDB database: {}", e))
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an existing database without taking the write lock, so several
    /// processes can query the same file. The schema is not created.
    pub fn new_read_only(db_path: &Path) -> Result<Self, DomainError> {
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| DomainError::store_unavailable(format!("Invalid DuckDB config: {}", e)))?;
        let conn = Connection::open_with_flags(db_path, config).map_err(|e| {
            DomainError::store_unavailable(format!(
                "Failed to open DuckDB database read-only: {}",
                e
            ))
        })?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::initialize_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), DomainError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS survey_groups (
                id BIGINT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                restrict_voting BOOLEAN NOT NULL DEFAULT FALSE
            );

            CREATE TABLE IF NOT EXISTS surveys (
                id BIGINT PRIMARY KEY,
                title TEXT NOT NULL,
                survey_group_id BIGINT
            );

            CREATE TABLE IF NOT EXISTS questions (
                id BIGINT PRIMARY KEY,
                survey_id BIGINT NOT NULL,
                text TEXT NOT NULL DEFAULT ''
            );

            CREATE TABLE IF NOT EXISTS votes (
                id BIGINT PRIMARY KEY,
                question_id BIGINT NOT NULL,
                fingerprint TEXT NOT NULL,
                is_valid BOOLEAN NOT NULL DEFAULT TRUE
            );
            "#,
        )
        .map_err(|e| {
            DomainError::store_unavailable(format!("Failed to initialize schema: {}", e))
        })?;

        debug!("DuckDB survey schema initialized");
        Ok(())
    }

    /// First row of `sql` as `(row id, referenced id)`, if any.
    fn first_dangling(conn: &Connection, sql: &str) -> Result<Option<(i64, i64)>, DomainError> {
        match conn.query_row(sql, [], |row| Ok((row.get(0)?, row.get(1)?))) {
            Ok(pair) => Ok(Some(pair)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::store_unavailable(format!(
                "Failed to check references: {}",
                e
            ))),
        }
    }

    fn check_references(conn: &Connection) -> Result<(), DomainError> {
        let checks = [
            (
                "survey",
                "survey group",
                "SELECT s.id, s.survey_group_id FROM surveys s \
                 WHERE s.survey_group_id IS NOT NULL \
                 AND NOT EXISTS (SELECT 1 FROM survey_groups g WHERE g.id = s.survey_group_id) \
                 ORDER BY s.id LIMIT 1",
            ),
            (
                "question",
                "survey",
                "SELECT q.id, q.survey_id FROM questions q \
                 WHERE NOT EXISTS (SELECT 1 FROM surveys s WHERE s.id = q.survey_id) \
                 ORDER BY q.id LIMIT 1",
            ),
            (
                "vote",
                "question",
                "SELECT v.id, v.question_id FROM votes v \
                 WHERE NOT EXISTS (SELECT 1 FROM questions q WHERE q.id = v.question_id) \
                 ORDER BY v.id LIMIT 1",
            ),
        ];

        for (relation, target, sql) in checks {
            if let Some((id, target_id)) = Self::first_dangling(conn, sql)? {
                return Err(DomainError::invalid_argument(format!(
                    "{} {} references missing {} {}",
                    relation, id, target, target_id
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl GroupVoteRepository for DuckdbSurveyStore {
    async fn has_valid_vote_in_group(
        &self,
        group_id: i64,
        fingerprint: &str,
    ) -> Result<bool, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!("SELECT EXISTS (SELECT 1 {})", VOTED_IN_GROUP_JOIN);

        conn.query_row(&sql, params![group_id, fingerprint], |row| row.get(0))
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to query group votes: {}", e))
            })
    }

    async fn find_voted_survey(
        &self,
        group_id: i64,
        fingerprint: &str,
    ) -> Result<Option<VotedSurvey>, DomainError> {
        let conn = self.conn.lock().await;
        let sql = format!(
            "SELECT surveys.id, surveys.title {} ORDER BY votes.id LIMIT 1",
            VOTED_IN_GROUP_JOIN
        );

        match conn.query_row(&sql, params![group_id, fingerprint], |row| {
            Ok(VotedSurvey::new(row.get(0)?, row.get::<_, String>(1)?))
        }) {
            Ok(voted) => Ok(Some(voted)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::store_unavailable(format!(
                "Failed to query voted survey: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl SurveyGroupRepository for DuckdbSurveyStore {
    async fn find_group(&self, id: i64) -> Result<Option<SurveyGroup>, DomainError> {
        let conn = self.conn.lock().await;

        match conn.query_row(
            "SELECT id, name, description, restrict_voting FROM survey_groups WHERE id = ?",
            params![id],
            |row| {
                Ok(SurveyGroup::reconstitute(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                ))
            },
        ) {
            Ok(group) => Ok(Some(group)),
            Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DomainError::store_unavailable(format!(
                "Failed to query survey group: {}",
                e
            ))),
        }
    }

    async fn list_groups(&self) -> Result<Vec<SurveyGroup>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, description, restrict_voting FROM survey_groups \
                 ORDER BY name, id",
            )
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to prepare statement: {}", e))
            })?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SurveyGroup::reconstitute(
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                ))
            })
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to query survey groups: {}", e))
            })?;

        let mut groups = Vec::new();
        for row in rows {
            groups.push(row.map_err(|e| {
                DomainError::store_unavailable(format!("Failed to read row: {}", e))
            })?);
        }
        Ok(groups)
    }

    async fn surveys_in_group(&self, group_id: i64) -> Result<Vec<Survey>, DomainError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(
                "SELECT id, title, survey_group_id FROM surveys \
                 WHERE survey_group_id = ? ORDER BY id",
            )
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to prepare statement: {}", e))
            })?;

        let rows = stmt
            .query_map(params![group_id], |row| {
                Ok(Survey::new(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?))
            })
            .map_err(|e| {
                DomainError::store_unavailable(format!("Failed to query surveys: {}", e))
            })?;

        let mut surveys = Vec::new();
        for row in rows {
            surveys.push(row.map_err(|e| {
                DomainError::store_unavailable(format!("Failed to read row: {}", e))
            })?);
        }
        Ok(surveys)
    }
}

#[async_trait]
impl DatasetImporter for DuckdbSurveyStore {
    async fn import(&self, dataset: &SurveyDataset) -> Result<ImportSummary, DomainError> {
        dataset.validate()?;
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction().map_err(|e| {
            DomainError::store_unavailable(format!("Failed to begin transaction: {}", e))
        })?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO survey_groups (id, name, description, restrict_voting) \
                     VALUES (?, ?, ?, ?)",
                )
                .map_err(|e| {
                    DomainError::store_unavailable(format!("Failed to prepare statement: {}", e))
                })?;
            for group in &dataset.survey_groups {
                stmt.execute(params![
                    group.require_id()?,
                    group.name(),
                    group.description(),
                    group.restrict_voting(),
                ])
                .map_err(|e| {
                    DomainError::store_unavailable(format!("Failed to save survey group: {}", e))
                })?;
            }
        }

        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO surveys (id, title, survey_group_id) \
                     VALUES (?, ?, ?)",
                )
                .map_err(|e| {
                    DomainError::store_unavailable(format!("Failed to prepare statement: {}", e))
                })?;
            for survey in &dataset.surveys {
                stmt.execute(params![survey.id(), survey.title(), survey.survey_group_id()])
                    .map_err(|e| {
                        DomainError::store_unavailable(format!("Failed to save survey: {}", e))
                    })?;
            }
        }

        {
            let mut stmt = tx
                .prepare("INSERT OR REPLACE INTO questions (id, survey_id, text) VALUES (?, ?, ?)")
                .map_err(|e| {
                    DomainError::store_unavailable(format!("Failed to prepare statement: {}", e))
                })?;
            for question in &dataset.questions {
                stmt.execute(params![question.id(), question.survey_id(), question.text()])
                    .map_err(|e| {
                        DomainError::store_unavailable(format!("Failed to save question: {}", e))
                    })?;
            }
        }

        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO votes (id, question_id, fingerprint, is_valid) \
                     VALUES (?, ?, ?, ?)",
                )
                .map_err(|e| {
                    DomainError::store_unavailable(format!("Failed to prepare statement: {}", e))
                })?;
            for vote in &dataset.votes {
                stmt.execute(params![
                    vote.id(),
                    vote.question_id(),
                    vote.fingerprint(),
                    vote.is_valid(),
                ])
                .map_err(|e| {
                    DomainError::store_unavailable(format!("Failed to save vote: {}", e))
                })?;
            }
        }

        // Dropping the transaction on error rolls the import back.
        Self::check_references(&tx)?;

        tx.commit()
            .map_err(|e| DomainError::store_unavailable(format!("Failed to commit: {}", e)))?;

        let summary = dataset.summary();
        debug!("Imported {} rows into DuckDB", summary.total());
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Question, Vote};

    fn scenario() -> SurveyDataset {
        SurveyDataset {
            survey_groups: vec![SurveyGroup::reconstitute(
                1,
                "Council".to_string(),
                Some("City council".to_string()),
                true,
            )],
            surveys: vec![Survey::new(10, "Budget", Some(1))],
            questions: vec![Question::new(100, 10, "Approve?")],
            votes: vec![Vote::new(1, 100, "abc")],
        }
    }

    #[tokio::test]
    async fn join_finds_valid_vote() {
        let store = DuckdbSurveyStore::in_memory().unwrap();
        store.import(&scenario()).await.unwrap();

        assert!(store.has_valid_vote_in_group(1, "abc").await.unwrap());
        assert!(!store.has_valid_vote_in_group(1, "xyz").await.unwrap());
        assert_eq!(
            store.find_voted_survey(1, "abc").await.unwrap(),
            Some(VotedSurvey::new(10, "Budget"))
        );
        assert_eq!(store.find_voted_survey(1, "xyz").await.unwrap(), None);
    }

    #[tokio::test]
    async fn group_round_trips_through_store() {
        let store = DuckdbSurveyStore::in_memory().unwrap();
        store.import(&scenario()).await.unwrap();

        let group = store.find_group(1).await.unwrap().expect("group exists");
        assert_eq!(group.name(), "Council");
        assert_eq!(group.description(), Some("City council"));
        assert!(group.restrict_voting());
        assert_eq!(store.find_group(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn dangling_question_rolls_back_import() {
        let store = DuckdbSurveyStore::in_memory().unwrap();

        let mut broken = scenario();
        broken.questions.push(Question::new(101, 99, "Orphan?"));
        let err = store.import(&broken).await.unwrap_err();

        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("question 101"));
        assert!(store.list_groups().await.unwrap().is_empty());
        assert!(!store.has_valid_vote_in_group(1, "abc").await.unwrap());
    }
}
