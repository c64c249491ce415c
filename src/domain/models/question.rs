use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: i64,
    survey_id: i64,
    #[serde(default)]
    text: String,
}

impl Question {
    pub fn new(id: i64, survey_id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            survey_id,
            text: text.into(),
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn survey_id(&self) -> i64 {
        self.survey_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
