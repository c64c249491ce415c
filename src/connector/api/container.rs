use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    DuckdbSurveyStore, DuplicateVoteChecker, ImportDatasetUseCase, ListGroupSurveysUseCase,
    ListSurveyGroupsUseCase,
};

pub const DATABASE_FILE: &str = "votecheck.duckdb";

pub struct ContainerConfig {
    pub data_dir: String,
    /// Open the database without the exclusive write lock.
    ///
    /// Set for commands that never write (`groups`, `surveys`, `check`) so
    /// several processes can query the same file at once.
    pub read_only: bool,
}

pub struct Container {
    store: Arc<DuckdbSurveyStore>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let db_path = PathBuf::from(&config.data_dir).join(DATABASE_FILE);

        let store = if config.read_only {
            if !db_path.exists() {
                anyhow::bail!(
                    "No survey database at {}; run `votecheck init` first",
                    db_path.display()
                );
            }
            debug!("Opening survey store (read-only) at {:?}", db_path);
            DuckdbSurveyStore::new_read_only(&db_path)
        } else {
            std::fs::create_dir_all(&config.data_dir)
                .with_context(|| format!("Failed to create data dir {}", config.data_dir))?;
            debug!("Opening survey store at {:?}", db_path);
            DuckdbSurveyStore::new(&db_path)
        }?;

        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }

    pub fn duplicate_vote_checker(&self) -> DuplicateVoteChecker {
        DuplicateVoteChecker::new(self.store.clone())
    }

    pub fn list_groups_use_case(&self) -> ListSurveyGroupsUseCase {
        ListSurveyGroupsUseCase::new(self.store.clone())
    }

    pub fn group_surveys_use_case(&self) -> ListGroupSurveysUseCase {
        ListGroupSurveysUseCase::new(self.store.clone())
    }

    pub fn import_use_case(&self) -> ImportDatasetUseCase {
        ImportDatasetUseCase::new(self.store.clone())
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.config.data_dir).join(DATABASE_FILE)
    }
}
