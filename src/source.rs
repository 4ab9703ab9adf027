//! Where projects come from.

use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{Project, Reference};

/// Read access to the curator's projects.
pub trait ProjectSource {
    fn list(&self) -> Vec<Project>;

    fn read(&self, id: &str) -> Option<Project>;

    /// Projects whose name contains `term`, ignoring case.
    fn search(&self, term: &str) -> Vec<Project> {
        let term = term.to_lowercase();
        self.list()
            .into_iter()
            .filter(|p| p.name.to_lowercase().contains(&term))
            .collect()
    }
}

/// A fixed list of projects held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjects {
    projects: Vec<Project>,
}

impl InMemoryProjects {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// The two demo projects shipped with the wizard.
    pub fn sample() -> Self {
        Self::new(vec![lets_solve_it(), client_portal_redesign()])
    }

    /// Load a JSON array of projects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read projects file {}", path.display()))?;
        let projects: Vec<Project> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse projects file {}", path.display()))?;
        tracing::debug!(count = projects.len(), path = %path.display(), "Loaded projects");
        Ok(Self::new(projects))
    }

    pub fn insert(&mut self, project: Project) {
        self.projects.retain(|p| p.id != project.id);
        self.projects.push(project);
    }
}

impl ProjectSource for InMemoryProjects {
    fn list(&self) -> Vec<Project> {
        self.projects.clone()
    }

    fn read(&self, id: &str) -> Option<Project> {
        self.projects.iter().find(|p| p.id == id).cloned()
    }
}

fn reference(id: &str, title: &str, description: &str, insights: &[&str]) -> Reference {
    Reference {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        url: None,
        insights: insights.iter().map(|s| s.to_string()).collect(),
    }
}

/// The legal-assistance demo project, also used as the default current
/// project.
pub fn lets_solve_it() -> Project {
    Project {
        id: "1".to_string(),
        name: "Let's Solve It".to_string(),
        goals: vec![
            "Reduce legal dispute resolution time/cost by 70% using AI.".to_string(),
            "Achieve 95% accuracy in document analysis.".to_string(),
            "Provide 24/7 access to legal assistance.".to_string(),
        ],
        references: vec![
            reference(
                "ref1",
                "LegalZoom Analysis",
                "Review of LegalZoom's document automation",
                &["Strong document templates", "Weak personalization", "Limited AI capabilities"],
            ),
            reference(
                "ref2",
                "DoNotPay Review",
                "Analysis of DoNotPay's chatbot functionality",
                &[
                    "Simple user interface",
                    "Limited to basic legal issues",
                    "Chatbot has knowledge gaps",
                ],
            ),
            reference(
                "ref3",
                "Clio Evaluation",
                "Evaluation of Clio's analytics features",
                &[
                    "Comprehensive case tracking",
                    "Poor document analysis",
                    "Lacks AI-powered insights",
                ],
            ),
        ],
    }
}

pub fn client_portal_redesign() -> Project {
    Project {
        id: "2".to_string(),
        name: "Client Portal Redesign".to_string(),
        goals: vec![
            "Improve client onboarding experience".to_string(),
            "Streamline document sharing".to_string(),
            "Add real-time collaboration tools".to_string(),
        ],
        references: vec![reference(
            "ref4",
            "Competitor portal analysis",
            "Review of top 5 competitor client portals",
            &[
                "Most offer single sign-on",
                "Document versioning is standard",
                "Real-time chat is becoming common",
            ],
        )],
    }
}
