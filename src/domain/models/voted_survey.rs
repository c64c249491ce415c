use std::fmt;

use serde::{Deserialize, Serialize};

/// The survey a fingerprint already voted in, as projected by the
/// duplicate-vote join.
///
/// Only the identifier and title are read; this is deliberately not a
/// [`Survey`](super::Survey).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotedSurvey {
    survey_id: i64,
    title: String,
}

impl VotedSurvey {
    pub fn new(survey_id: i64, title: impl Into<String>) -> Self {
        Self {
            survey_id,
            title: title.into(),
        }
    }

    pub fn survey_id(&self) -> i64 {
        self.survey_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for VotedSurvey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (survey {})", self.title, self.survey_id)
    }
}
