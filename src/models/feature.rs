use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A proposed capability of the project under construction.
///
/// Features are either suggested by the [suggestion engine](crate::suggest)
/// or added by hand. They stay editable until the wizard moves past the
/// feature step, at which point incomplete entries are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub priority: Priority,
    /// Set when the feature came from the suggestion engine.
    #[serde(default)]
    pub suggested_by_system: bool,
    /// Ids of project references this feature draws on.
    #[serde(default)]
    pub linked_references: BTreeSet<String>,
}

impl Feature {
    /// A blank manual entry, as produced by "Add Feature".
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            priority: Priority::Medium,
            suggested_by_system: false,
            linked_references: BTreeSet::new(),
        }
    }

    pub fn suggested(name: &str, description: &str, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.to_string(),
            priority,
            suggested_by_system: true,
            linked_references: BTreeSet::new(),
        }
    }

    /// Whether both name and description carry non-whitespace text.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// Returns a copy of this feature with `update` applied.
    pub fn with(&self, update: FeatureUpdate) -> Self {
        let mut next = self.clone();
        match update {
            FeatureUpdate::Name(name) => next.name = name,
            FeatureUpdate::Description(description) => next.description = description,
            FeatureUpdate::Priority(priority) => next.priority = priority,
            FeatureUpdate::LinkReference(id) => {
                next.linked_references.insert(id);
            }
            FeatureUpdate::UnlinkReference(id) => {
                next.linked_references.remove(&id);
            }
        }
        next
    }
}

/// Importance of a feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parses a priority label, ignoring case.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A single field edit on a [`Feature`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FeatureUpdate {
    Name(String),
    Description(String),
    Priority(Priority),
    LinkReference(String),
    UnlinkReference(String),
}

/// Direction for reordering a feature within the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}
