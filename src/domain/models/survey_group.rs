use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A set of surveys that may share a voting restriction.
///
/// When `restrict_voting` is set, a voter may take part in at most one survey
/// of the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyGroup {
    /// `None` until the group has been persisted.
    #[serde(default)]
    id: Option<i64>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    restrict_voting: bool,
}

impl SurveyGroup {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        restrict_voting: bool,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            restrict_voting,
        }
    }

    /// Reconstitutes from persisted data (used by adapters).
    pub fn reconstitute(
        id: i64,
        name: String,
        description: Option<String>,
        restrict_voting: bool,
    ) -> Self {
        Self {
            id: Some(id),
            name,
            description,
            restrict_voting,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// The identifier, or `InvalidArgument` for an unsaved group.
    pub fn require_id(&self) -> Result<i64, DomainError> {
        self.id.ok_or_else(|| {
            DomainError::invalid_argument(format!(
                "Survey group '{}' has no identifier",
                self.name
            ))
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn restrict_voting(&self) -> bool {
        self.restrict_voting
    }

    pub fn summary(&self) -> String {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unsaved".to_string());
        let mode = if self.restrict_voting {
            "one survey per voter"
        } else {
            "unrestricted"
        };
        format!("{} ({}, {})", self.name, id, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group_is_unsaved() {
        let group = SurveyGroup::new("Elections", None, true);

        assert_eq!(group.id(), None);
        assert_eq!(group.name(), "Elections");
        assert!(group.restrict_voting());
        assert!(group.require_id().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_reconstituted_group_has_id() {
        let group = SurveyGroup::reconstitute(
            7,
            "Feedback".to_string(),
            Some("Quarterly".to_string()),
            false,
        );

        assert_eq!(group.require_id().unwrap(), 7);
        assert_eq!(group.description(), Some("Quarterly"));
        assert_eq!(group.summary(), "Feedback (7, unrestricted)");
    }

    #[test]
    fn test_deserialize_defaults() {
        let group: SurveyGroup = serde_json::from_str(r#"{"id": 3, "name": "Board"}"#).unwrap();

        assert_eq!(group.id(), Some(3));
        assert!(!group.restrict_voting());
        assert_eq!(group.description(), None);
    }
}
