use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collections;
use crate::error::WizardError;
use crate::models::{Feature, Project, UserFlow, WizardStep};
use crate::suggest::suggest_features;

/// The complete data of one wizard session.
///
/// This is a plain value. Transitions are methods that borrow the current
/// state and return the next one, leaving `self` untouched when they fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub project: Option<Project>,
    pub features: Vec<Feature>,
    pub user_flows: Vec<UserFlow>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::initial(None)
    }
}

impl WizardState {
    /// Starting state. An injected project comes with fresh suggestions.
    pub fn initial(project: Option<Project>) -> Self {
        let features = suggest_features(project.as_ref());
        Self {
            current_step: WizardStep::SelectProject,
            project,
            features,
            user_flows: Vec::new(),
        }
    }

    pub fn select_project(&self, project: Project) -> Result<Self, WizardError> {
        if self.current_step != WizardStep::SelectProject {
            return Err(WizardError::InvalidTransition {
                action: "select a project",
                step: self.current_step,
            });
        }
        Ok(Self {
            current_step: WizardStep::DefineFeatures,
            features: suggest_features(Some(&project)),
            project: Some(project),
            user_flows: Vec::new(),
        })
    }

    /// Move to the next step, applying that step's guard.
    pub fn advance(&self) -> Result<Self, WizardError> {
        match self.current_step {
            WizardStep::SelectProject => {
                if self.project.is_none() {
                    return Err(WizardError::NoProjectSelected);
                }
                Ok(self.at(WizardStep::DefineFeatures))
            }
            WizardStep::DefineFeatures => {
                let valid: Vec<Feature> = self
                    .features
                    .iter()
                    .filter(|f| f.is_complete())
                    .cloned()
                    .collect();
                if valid.is_empty() {
                    return Err(WizardError::NoValidFeatures);
                }
                Ok(self.with_features(valid).at(WizardStep::DefineUserFlows))
            }
            WizardStep::DefineUserFlows => {
                let valid: Vec<UserFlow> = self
                    .user_flows
                    .iter()
                    .filter(|f| f.is_complete())
                    .cloned()
                    .collect();
                if valid.is_empty() {
                    return Err(WizardError::NoValidUserFlows);
                }
                let unreferenced: Vec<Uuid> = valid
                    .iter()
                    .filter(|f| f.references.is_empty())
                    .map(|f| f.id)
                    .collect();
                if !unreferenced.is_empty() {
                    return Err(WizardError::FlowsWithoutReferences {
                        flow_ids: unreferenced,
                    });
                }
                Ok(self.with_user_flows(valid).at(WizardStep::Summary))
            }
            WizardStep::Summary => Err(WizardError::InvalidTransition {
                action: "advance",
                step: self.current_step,
            }),
        }
    }

    pub fn retreat(&self) -> Result<Self, WizardError> {
        let previous = self
            .current_step
            .previous()
            .ok_or(WizardError::InvalidTransition {
                action: "go back",
                step: self.current_step,
            })?;
        Ok(self.at(previous))
    }

    /// Replace the feature list. Flows under features that are gone are
    /// dropped with them.
    pub fn with_features(&self, features: Vec<Feature>) -> Self {
        let user_flows = collections::retain_owned_flows(&self.user_flows, &features);
        Self {
            current_step: self.current_step,
            project: self.project.clone(),
            features,
            user_flows,
        }
    }

    pub fn with_user_flows(&self, user_flows: Vec<UserFlow>) -> Self {
        Self {
            user_flows,
            ..self.clone()
        }
    }

    pub fn feature(&self, id: Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn user_flow(&self, id: Uuid) -> Option<&UserFlow> {
        self.user_flows.iter().find(|f| f.id == id)
    }

    pub fn flows_for_feature(&self, feature_id: Uuid) -> Vec<&UserFlow> {
        self.user_flows
            .iter()
            .filter(|f| f.feature_id == feature_id)
            .collect()
    }

    fn at(&self, step: WizardStep) -> Self {
        Self {
            current_step: step,
            ..self.clone()
        }
    }
}
