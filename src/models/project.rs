use serde::{Deserialize, Serialize};

/// A source project that a wizard session initializes from.
///
/// Projects come from an external curator (see [`crate::source`]). The
/// wizard treats them as read-only, except through a
/// [`ProjectReview`](crate::review::ProjectReview) before commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Free-text goals; the suggestion engine scans these.
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Project {
    pub fn reference(&self, id: &str) -> Option<&Reference> {
        self.references.iter().find(|r| r.id == id)
    }
}

/// A competitor or analysis artifact owned by a project.
///
/// References are copied by value whenever they are attached to a
/// [`UserFlow`](super::UserFlow), so later edits to the project do not
/// reach flows that already hold a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Findings extracted from the reference.
    #[serde(default)]
    pub insights: Vec<String>,
}

/// Input for creating a new project through the workspace collaborator.
///
/// Goals and references are entered as plain lines; blank lines are
/// dropped when the input is normalized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    #[serde(default)]
    pub goals: Vec<String>,
    /// Reference titles, one per entry.
    #[serde(default)]
    pub references: Vec<String>,
}

/// A single edit to a project's goal list during review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GoalEdit {
    /// Append an empty goal to be filled in.
    Add,
    Update { index: usize, value: String },
    Remove { index: usize },
}
