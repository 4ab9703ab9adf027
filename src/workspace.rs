//! Persistence collaborator.
//!
//! Creating projects, saving a finished initialization and generating its
//! documentation all go through [`Workspace`]. The wizard does not care how
//! they are carried out, only whether they succeed. [`SimulatedWorkspace`]
//! waits a fixed delay and succeeds; a real backend would talk to storage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::error::WizardError;
use crate::models::{CreateProjectInput, Project, Reference};
use crate::notify::{Notice, Notifier};
use crate::summary::ProjectSummary;

pub const DEFAULT_PERSISTENCE_DELAY: Duration = Duration::from_millis(1500);

#[async_trait]
pub trait Workspace: Send + Sync {
    async fn create_project(&self, input: CreateProjectInput) -> Result<Project, WizardError>;

    async fn save_project(&self, summary: &ProjectSummary) -> Result<(), WizardError>;

    /// Returns the generated document.
    async fn generate_documentation(&self, summary: &ProjectSummary) -> Result<String, WizardError>;
}

/// Check and normalize project creation input.
///
/// The name must not be blank and at least one non-blank goal is required.
/// Blank goals and references are dropped.
pub fn normalize_input(input: CreateProjectInput) -> Result<CreateProjectInput, WizardError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(WizardError::InvalidProject(
            "Project name is required".to_string(),
        ));
    }
    let goals: Vec<String> = input
        .goals
        .into_iter()
        .filter(|g| !g.trim().is_empty())
        .collect();
    if goals.is_empty() {
        return Err(WizardError::InvalidProject(
            "At least one goal is required".to_string(),
        ));
    }
    let references = input
        .references
        .into_iter()
        .filter(|r| !r.trim().is_empty())
        .collect();
    Ok(CreateProjectInput {
        name,
        goals,
        references,
    })
}

#[derive(Debug, Clone)]
pub struct SimulatedWorkspace {
    delay: Duration,
}

impl Default for SimulatedWorkspace {
    fn default() -> Self {
        Self::new(DEFAULT_PERSISTENCE_DELAY)
    }
}

impl SimulatedWorkspace {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Workspace for SimulatedWorkspace {
    async fn create_project(&self, input: CreateProjectInput) -> Result<Project, WizardError> {
        let input = normalize_input(input)?;
        tokio::time::sleep(self.delay).await;

        let project = Project {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            goals: input.goals,
            references: input
                .references
                .into_iter()
                .map(|title| Reference {
                    id: format!("ref-{}", Uuid::new_v4()),
                    title,
                    description: String::new(),
                    url: None,
                    insights: Vec::new(),
                })
                .collect(),
        };
        tracing::info!(project = %project.id, name = %project.name, "Created project");
        Ok(project)
    }

    async fn save_project(&self, summary: &ProjectSummary) -> Result<(), WizardError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            project = %summary.project.id,
            features = summary.features.len(),
            flows = summary.flow_count(),
            "Saved project"
        );
        Ok(())
    }

    async fn generate_documentation(&self, summary: &ProjectSummary) -> Result<String, WizardError> {
        tokio::time::sleep(self.delay).await;
        Ok(summary.to_markdown(Utc::now()))
    }
}

/// Create a project in the background, posting the outcome as a notice.
pub fn spawn_create_project(
    workspace: Arc<dyn Workspace>,
    notifier: Arc<dyn Notifier>,
    input: CreateProjectInput,
) -> JoinHandle<Option<Project>> {
    tokio::spawn(async move {
        match workspace.create_project(input).await {
            Ok(project) => {
                notifier.notify(Notice::info(
                    "Project Created",
                    "Your project has been created successfully",
                ));
                Some(project)
            }
            Err(e) => {
                notifier.notify(e.to_notice());
                None
            }
        }
    })
}

/// Save a finished initialization in the background.
pub fn spawn_save_project(
    workspace: Arc<dyn Workspace>,
    notifier: Arc<dyn Notifier>,
    summary: ProjectSummary,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match workspace.save_project(&summary).await {
            Ok(()) => notifier.notify(Notice::info(
                "Project Saved",
                "Project has been saved to the workspace.",
            )),
            Err(e) => notifier.notify(e.to_notice()),
        }
    })
}

/// Generate documentation in the background; the handle yields the document.
pub fn spawn_generate_documentation(
    workspace: Arc<dyn Workspace>,
    notifier: Arc<dyn Notifier>,
    summary: ProjectSummary,
) -> JoinHandle<Option<String>> {
    tokio::spawn(async move {
        match workspace.generate_documentation(&summary).await {
            Ok(doc) => {
                notifier.notify(Notice::info(
                    "Documentation Generated",
                    "Project documentation has been generated and is ready for download.",
                ));
                Some(doc)
            }
            Err(e) => {
                notifier.notify(e.to_notice());
                None
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, goals: &[&str], references: &[&str]) -> CreateProjectInput {
        CreateProjectInput {
            name: name.to_string(),
            goals: goals.iter().map(|s| s.to_string()).collect(),
            references: references.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = normalize_input(input("   ", &["goal"], &[])).unwrap_err();
        assert_eq!(err.to_string(), "Project name is required");
    }

    #[test]
    fn blank_goals_do_not_count() {
        let err = normalize_input(input("P", &["", "  "], &[])).unwrap_err();
        assert_eq!(err.to_string(), "At least one goal is required");
    }

    #[test]
    fn blanks_are_dropped() {
        let normalized = normalize_input(input(" P ", &["a", ""], &["", "CCD dashboard"])).unwrap();
        assert_eq!(normalized.name, "P");
        assert_eq!(normalized.goals, vec!["a"]);
        assert_eq!(normalized.references, vec!["CCD dashboard"]);
    }
}
