//! Reviewing a project before it is committed to the wizard.
//!
//! Selecting a project from the list opens a review on a private copy. Goals
//! can be edited and the suggestions they lead to are shown alongside.
//! Nothing reaches the wizard until [`ProjectReview::confirm`] succeeds;
//! the wizard then suggests features from the confirmed goals.

use crate::error::WizardError;
use crate::models::*;
use crate::suggest::suggest_features;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReview {
    project: Project,
    preview: Vec<Feature>,
}

impl ProjectReview {
    /// Start reviewing a copy of `project`.
    pub fn open(project: &Project) -> Self {
        Self {
            preview: suggest_features(Some(project)),
            project: project.clone(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Features the current goals would produce.
    pub fn features(&self) -> &[Feature] {
        &self.preview
    }

    /// Apply a goal edit. Out-of-range indexes are ignored and the last goal
    /// cannot be removed.
    pub fn edit_goal(&mut self, edit: GoalEdit) {
        let mut goals = self.project.goals.clone();
        match edit {
            GoalEdit::Add => goals.push(String::new()),
            GoalEdit::Update { index, value } => {
                if let Some(goal) = goals.get_mut(index) {
                    *goal = value;
                }
            }
            GoalEdit::Remove { index } => {
                if index < goals.len() && goals.len() > 1 {
                    goals.remove(index);
                }
            }
        }
        self.project = Project {
            goals,
            ..self.project.clone()
        };
        self.preview = suggest_features(Some(&self.project));
    }

    /// Validate the review and hand back the edited project.
    ///
    /// Requires at least one non-blank goal and at least one reference.
    pub fn confirm(self) -> Result<Project, WizardError> {
        if self.project.goals.iter().all(|g| g.trim().is_empty()) {
            return Err(WizardError::InvalidProject(
                "At least one goal is required".to_string(),
            ));
        }
        if self.project.references.is_empty() {
            return Err(WizardError::InvalidProject(
                "At least one reference is required".to_string(),
            ));
        }
        Ok(self.project)
    }
}
