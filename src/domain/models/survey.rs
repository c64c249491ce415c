use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    id: i64,
    title: String,
    /// Surveys may live outside any group.
    #[serde(default)]
    survey_group_id: Option<i64>,
}

impl Survey {
    pub fn new(id: i64, title: impl Into<String>, survey_group_id: Option<i64>) -> Self {
        Self {
            id,
            title: title.into(),
            survey_group_id,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn survey_group_id(&self) -> Option<i64> {
        self.survey_group_id
    }

    pub fn belongs_to(&self, group_id: i64) -> bool {
        self.survey_group_id == Some(group_id)
    }
}
