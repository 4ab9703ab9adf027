//! The final summary of an initialization session.
//!
//! [`ProjectSummary`] carries what the summary tabs show (details, goals,
//! features, user flows). It renders as an ASCII tree for terminals and as
//! Markdown for generated documentation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Feature, Priority, Project, UserFlow};
use crate::wizard::WizardState;

const SUGGESTED: char = '◆';
const MANUAL: char = '◇';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project: Project,
    pub features: Vec<FeatureSummary>,
}

/// A feature together with the flows defined under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSummary {
    #[serde(flatten)]
    pub feature: Feature,
    pub user_flows: Vec<UserFlow>,
}

impl ProjectSummary {
    /// `None` until a project is selected.
    pub fn from_state(state: &WizardState) -> Option<Self> {
        let project = state.project.clone()?;
        let features = state
            .features
            .iter()
            .map(|feature| FeatureSummary {
                feature: feature.clone(),
                user_flows: state
                    .flows_for_feature(feature.id)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();
        Some(Self { project, features })
    }

    pub fn flow_count(&self) -> usize {
        self.features.iter().map(|f| f.user_flows.len()).sum()
    }

    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.features
            .iter()
            .filter(|f| f.feature.priority == priority)
            .count()
    }

    /// Render the project as a tree of features and their flows.
    ///
    /// Example output:
    /// ```text
    /// Let's Solve It
    /// ├── ◆ AI Document Analyzer [High]
    /// │   └── Upload contract (LegalZoom Analysis)
    /// └── ◇ Client Chat [Medium]
    /// ```
    pub fn render_tree(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.project.name);
        output.push('\n');

        for (i, entry) in self.features.iter().enumerate() {
            let is_last = i == self.features.len() - 1;
            let branch = if is_last { "└── " } else { "├── " };
            let symbol = if entry.feature.suggested_by_system {
                SUGGESTED
            } else {
                MANUAL
            };
            output.push_str(branch);
            output.push(symbol);
            output.push(' ');
            output.push_str(&format!(
                "{} [{}]\n",
                entry.feature.name,
                entry.feature.priority.as_str()
            ));

            let prefix = if is_last { "    " } else { "│   " };
            for (j, flow) in entry.user_flows.iter().enumerate() {
                let branch = if j == entry.user_flows.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                output.push_str(prefix);
                output.push_str(branch);
                output.push_str(&flow.name);
                if !flow.references.is_empty() {
                    let titles: Vec<&str> =
                        flow.references.iter().map(|r| r.title.as_str()).collect();
                    output.push_str(&format!(" ({})", titles.join(", ")));
                }
                output.push('\n');
            }
        }
        output
    }

    /// Render project documentation as Markdown.
    pub fn to_markdown(&self, generated_at: DateTime<Utc>) -> String {
        let mut md = String::new();
        md.push_str(&format!("# {}\n\n", self.project.name));
        md.push_str(&format!(
            "_Generated {}_\n\n",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
        md.push_str(&format!(
            "- Project ID: `{}`\n- Features: {} ({} high, {} medium, {} low)\n- User flows: {}\n\n",
            self.project.id,
            self.features.len(),
            self.count_by_priority(Priority::High),
            self.count_by_priority(Priority::Medium),
            self.count_by_priority(Priority::Low),
            self.flow_count(),
        ));

        md.push_str("## Goals\n\n");
        for goal in &self.project.goals {
            md.push_str(&format!("- {}\n", goal));
        }

        md.push_str("\n## Features\n\n");
        for entry in &self.features {
            md.push_str(&format!(
                "### {} ({})\n\n{}\n\n",
                entry.feature.name,
                entry.feature.priority.as_str(),
                entry.feature.description
            ));
            if entry.user_flows.is_empty() {
                continue;
            }
            md.push_str("#### User Flows\n\n");
            for flow in &entry.user_flows {
                md.push_str(&format!("- **{}**: {}\n", flow.name, flow.description));
                for reference in &flow.references {
                    md.push_str(&format!("  - {}\n", reference.title));
                }
            }
            md.push('\n');
        }
        md
    }
}
