use serde::{Deserialize, Serialize};

/// A single answer cast by an anonymous voter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    id: i64,
    question_id: i64,
    /// Opaque client-derived voter identity.
    fingerprint: String,
    /// Invalidated votes stay stored but never count.
    #[serde(default = "default_is_valid")]
    is_valid: bool,
}

fn default_is_valid() -> bool {
    true
}

impl Vote {
    pub fn new(id: i64, question_id: i64, fingerprint: impl Into<String>) -> Self {
        Self {
            id,
            question_id,
            fingerprint: fingerprint.into(),
            is_valid: true,
        }
    }

    pub fn invalidated(mut self) -> Self {
        self.is_valid = false;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn question_id(&self) -> i64 {
        self.question_id
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn counts_for(&self, fingerprint: &str) -> bool {
        self.is_valid && self.fingerprint == fingerprint
    }
}
