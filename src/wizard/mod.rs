//! The initialization wizard: a session object owning a [`WizardState`].
//!
//! Steps run 2 → 3 → 4 → 5:
//!
//! | Step | Name              | Forward guard                                          |
//! |------|-------------------|--------------------------------------------------------|
//! | 2    | Select project    | a project must be selected                             |
//! | 3    | Define features   | at least one feature with name and description         |
//! | 4    | Define user flows | at least one complete flow, every one with a reference |
//! | 5    | Summary           | terminal                                               |
//!
//! Every operation either replaces the state wholesale or leaves it
//! untouched. Failures are returned to the caller and also sent to the
//! session's [`Notifier`].

pub mod collections;
mod intent;
mod state;

pub use intent::Intent;
pub use state::WizardState;

use std::sync::Arc;

use uuid::Uuid;

use crate::error::WizardError;
use crate::models::*;
use crate::notify::{Notice, Notifier};
use crate::review::ProjectReview;
use crate::source::ProjectSource;
use crate::summary::ProjectSummary;

pub struct Wizard {
    state: WizardState,
    /// Project injected at startup, restored by [`Wizard::reset`].
    initial_project: Option<Project>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for Wizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("state", &self.state)
            .field("initial_project", &self.initial_project.as_ref().map(|p| &p.id))
            .finish()
    }
}

impl Wizard {
    /// A session that starts by choosing a project from a list.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: WizardState::initial(None),
            initial_project: None,
            notifier,
        }
    }

    /// A session opened from inside an existing project. The project is
    /// already selected and its suggestions are loaded; step 2 only shows
    /// its details.
    pub fn with_current_project(project: Project, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: WizardState::initial(Some(project.clone())),
            initial_project: Some(project),
            notifier,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn project(&self) -> Option<&Project> {
        self.state.project.as_ref()
    }

    pub fn features(&self) -> &[Feature] {
        &self.state.features
    }

    pub fn user_flows(&self) -> &[UserFlow] {
        &self.state.user_flows
    }

    pub fn flows_for_feature(&self, feature_id: Uuid) -> Vec<&UserFlow> {
        self.state.flows_for_feature(feature_id)
    }

    /// Summary of the session, once a project has been selected.
    pub fn summary(&self) -> Option<ProjectSummary> {
        ProjectSummary::from_state(&self.state)
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    // ============================================================
    // Navigation
    // ============================================================

    pub fn select_project(&mut self, project: Project) -> Result<(), WizardError> {
        tracing::info!(project = %project.id, name = %project.name, "Selecting project");
        let next = self.state.select_project(project);
        self.commit("select_project", next)
    }

    /// Commit a reviewed project. Features are suggested from the goals as
    /// edited during review.
    pub fn select_reviewed(&mut self, review: ProjectReview) -> Result<(), WizardError> {
        let project = match review.confirm() {
            Ok(project) => project,
            Err(e) => return self.reject("select_reviewed", e),
        };
        let name = project.name.clone();
        let next = self.state.select_project(project);
        self.commit("select_reviewed", next)?;
        self.notifier.notify(Notice::info(
            "Project Initialized",
            format!("{} has been initialized successfully", name),
        ));
        Ok(())
    }

    pub fn advance(&mut self) -> Result<(), WizardError> {
        let next = self.state.advance();
        self.commit("advance", next)
    }

    pub fn retreat(&mut self) -> Result<(), WizardError> {
        let next = self.state.retreat();
        self.commit("retreat", next)
    }

    /// Return to step 2 with the session's initial data.
    pub fn reset(&mut self) {
        tracing::info!("Resetting wizard");
        self.state = WizardState::initial(self.initial_project.clone());
    }

    // ============================================================
    // Features
    // ============================================================

    /// Replace the feature list wholesale.
    pub fn update_features(&mut self, features: Vec<Feature>) {
        tracing::debug!(count = features.len(), "Replacing features");
        self.state = self.state.with_features(features);
    }

    /// Append a blank manual feature and return its id.
    pub fn add_feature(&mut self) -> Result<Uuid, WizardError> {
        self.push_feature(Feature::blank())
    }

    pub fn update_feature(&mut self, id: Uuid, update: FeatureUpdate) -> Result<(), WizardError> {
        self.edit_features("update_feature", |features| {
            collections::update_feature(features, id, update)
        })
    }

    /// Remove a feature along with its user flows.
    pub fn remove_feature(&mut self, id: Uuid) -> Result<(), WizardError> {
        self.edit_features("remove_feature", |features| {
            collections::remove_feature(features, id)
        })
    }

    pub fn move_feature(&mut self, id: Uuid, direction: MoveDirection) -> Result<(), WizardError> {
        self.edit_features("move_feature", |features| {
            collections::move_feature(features, id, direction)
        })
    }

    // ============================================================
    // User flows
    // ============================================================

    pub fn update_user_flows(&mut self, user_flows: Vec<UserFlow>) {
        tracing::debug!(count = user_flows.len(), "Replacing user flows");
        self.state = self.state.with_user_flows(user_flows);
    }

    /// Append a blank flow under `feature_id` and return its id.
    pub fn add_user_flow(&mut self, feature_id: Uuid) -> Result<Uuid, WizardError> {
        self.push_user_flow(UserFlow::new(feature_id))
    }

    pub fn update_user_flow(&mut self, id: Uuid, update: FlowUpdate) -> Result<(), WizardError> {
        self.edit_flows("update_user_flow", |flows, _| {
            collections::update_flow(flows, id, update)
        })
    }

    pub fn remove_user_flow(&mut self, id: Uuid) -> Result<(), WizardError> {
        self.edit_flows("remove_user_flow", |flows, _| collections::remove_flow(flows, id))
    }

    /// Attach a copy of the selected project's reference to a flow.
    ///
    /// Attaching a reference that is already there is rejected with a
    /// warning and changes nothing.
    pub fn attach_reference(&mut self, flow_id: Uuid, reference_id: &str) -> Result<(), WizardError> {
        self.edit_flows("attach_reference", |flows, project| {
            let reference = project
                .and_then(|p| p.reference(reference_id))
                .ok_or_else(|| WizardError::ReferenceNotFound(reference_id.to_string()))?;
            collections::replace_flow(flows, flow_id, |flow| flow.with_reference(reference))
        })
    }

    pub fn detach_reference(&mut self, flow_id: Uuid, reference_id: &str) -> Result<(), WizardError> {
        self.edit_flows("detach_reference", |flows, _| {
            collections::replace_flow(flows, flow_id, |flow| {
                Ok(flow.without_reference(reference_id))
            })
        })
    }

    // ============================================================
    // Intents
    // ============================================================

    /// Apply one intent. Project ids are resolved against `source`.
    pub fn dispatch(&mut self, intent: Intent, source: &dyn ProjectSource) -> Result<(), WizardError> {
        tracing::debug!(intent = intent.name(), step = %self.step(), "Dispatching intent");
        match intent {
            Intent::SelectProject { project_id } => match source.read(&project_id) {
                Some(project) => self.select_project(project),
                None => self.reject("select_project", WizardError::ProjectNotFound(project_id)),
            },
            Intent::Advance => self.advance(),
            Intent::Retreat => self.retreat(),
            Intent::Reset => {
                self.reset();
                Ok(())
            }
            Intent::AddFeature {
                name,
                description,
                priority,
            } => {
                let feature = Feature {
                    name,
                    description,
                    priority,
                    ..Feature::blank()
                };
                self.push_feature(feature).map(|_| ())
            }
            Intent::UpdateFeature { feature, update } => {
                let id = self.feature_id_by_name(&feature)?;
                self.update_feature(id, update)
            }
            Intent::RemoveFeature { feature } => {
                let id = self.feature_id_by_name(&feature)?;
                self.remove_feature(id)
            }
            Intent::MoveFeature { feature, direction } => {
                let id = self.feature_id_by_name(&feature)?;
                self.move_feature(id, direction)
            }
            Intent::AddUserFlow {
                feature,
                name,
                description,
            } => {
                let feature_id = self.feature_id_by_name(&feature)?;
                let flow = UserFlow {
                    name,
                    description,
                    ..UserFlow::new(feature_id)
                };
                self.push_user_flow(flow).map(|_| ())
            }
            Intent::UpdateUserFlow { flow, update } => {
                let id = self.flow_id_by_name(&flow)?;
                self.update_user_flow(id, update)
            }
            Intent::RemoveUserFlow { flow } => {
                let id = self.flow_id_by_name(&flow)?;
                self.remove_user_flow(id)
            }
            Intent::AttachReference { flow, reference_id } => {
                let id = self.flow_id_by_name(&flow)?;
                self.attach_reference(id, &reference_id)
            }
            Intent::DetachReference { flow, reference_id } => {
                let id = self.flow_id_by_name(&flow)?;
                self.detach_reference(id, &reference_id)
            }
        }
    }

    fn feature_id_by_name(&self, name: &str) -> Result<Uuid, WizardError> {
        let name = name.trim();
        match self.state.features.iter().find(|f| f.name.trim() == name) {
            Some(f) => Ok(f.id),
            None => self.reject("lookup_feature", WizardError::FeatureNotFound(name.to_string())),
        }
    }

    fn flow_id_by_name(&self, name: &str) -> Result<Uuid, WizardError> {
        let name = name.trim();
        match self.state.user_flows.iter().find(|f| f.name.trim() == name) {
            Some(f) => Ok(f.id),
            None => self.reject("lookup_user_flow", WizardError::UserFlowNotFound(name.to_string())),
        }
    }

    // ============================================================
    // Internals
    // ============================================================

    fn push_feature(&mut self, feature: Feature) -> Result<Uuid, WizardError> {
        let id = feature.id;
        self.edit_features("add_feature", |features| Ok(collections::push(features, feature)))?;
        Ok(id)
    }

    fn push_user_flow(&mut self, flow: UserFlow) -> Result<Uuid, WizardError> {
        let id = flow.id;
        if self.state.feature(flow.feature_id).is_none() {
            let err = WizardError::FeatureNotFound(flow.feature_id.to_string());
            return self.reject("add_user_flow", err);
        }
        self.edit_flows("add_user_flow", |flows, _| Ok(collections::push(flows, flow)))?;
        Ok(id)
    }

    /// Feature edits are only accepted on the feature step.
    fn edit_features<F>(&mut self, op: &'static str, f: F) -> Result<(), WizardError>
    where
        F: FnOnce(&[Feature]) -> Result<Vec<Feature>, WizardError>,
    {
        let next = self
            .require_step(WizardStep::DefineFeatures, "edit features")
            .and_then(|_| f(&self.state.features))
            .map(|features| self.state.with_features(features));
        self.commit(op, next)
    }

    /// Flow edits are only accepted on the user flow step.
    fn edit_flows<F>(&mut self, op: &'static str, f: F) -> Result<(), WizardError>
    where
        F: FnOnce(&[UserFlow], Option<&Project>) -> Result<Vec<UserFlow>, WizardError>,
    {
        let next = self
            .require_step(WizardStep::DefineUserFlows, "edit user flows")
            .and_then(|_| f(&self.state.user_flows, self.state.project.as_ref()))
            .map(|flows| self.state.with_user_flows(flows));
        self.commit(op, next)
    }

    fn require_step(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.state.current_step == step {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                action,
                step: self.state.current_step,
            })
        }
    }

    fn commit(
        &mut self,
        op: &'static str,
        next: Result<WizardState, WizardError>,
    ) -> Result<(), WizardError> {
        match next {
            Ok(next) => {
                if next.current_step != self.state.current_step {
                    tracing::info!(
                        from = %self.state.current_step,
                        to = %next.current_step,
                        "Wizard step changed"
                    );
                }
                self.state = next;
                Ok(())
            }
            Err(e) => self.reject(op, e),
        }
    }

    fn reject<T>(&self, op: &'static str, e: WizardError) -> Result<T, WizardError> {
        tracing::warn!(op = op, step = %self.state.current_step, "Rejected: {}", e);
        self.notifier.notify(e.to_notice());
        Err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;

    fn project() -> Project {
        Project {
            id: "p1".into(),
            name: "Portal".into(),
            goals: vec!["Improve onboarding".into()],
            references: vec![Reference {
                id: "ref1".into(),
                title: "Competitor".into(),
                description: "".into(),
                url: None,
                insights: vec![],
            }],
        }
    }

    #[test]
    fn feature_edits_rejected_outside_feature_step() {
        let notifier = Arc::new(MemoryNotifier::new());
        let mut wizard = Wizard::new(notifier.clone());
        let err = wizard.add_feature().unwrap_err();
        assert!(matches!(err, WizardError::InvalidTransition { .. }));
        assert!(wizard.features().is_empty());
        assert_eq!(notifier.notices().len(), 1);
    }

    #[test]
    fn dispatch_resolves_names() {
        let source = crate::source::InMemoryProjects::new(vec![project()]);
        let mut wizard = Wizard::new(Arc::new(MemoryNotifier::new()));
        wizard
            .dispatch(Intent::SelectProject { project_id: "p1".into() }, &source)
            .unwrap();
        wizard
            .dispatch(
                Intent::AddFeature {
                    name: "Onboarding".into(),
                    description: "Guided setup".into(),
                    priority: Priority::High,
                },
                &source,
            )
            .unwrap();
        wizard.dispatch(Intent::Advance, &source).unwrap();
        wizard
            .dispatch(
                Intent::AddUserFlow {
                    feature: "Onboarding".into(),
                    name: "Sign up".into(),
                    description: "Create an account".into(),
                },
                &source,
            )
            .unwrap();
        wizard
            .dispatch(
                Intent::AttachReference {
                    flow: "Sign up".into(),
                    reference_id: "ref1".into(),
                },
                &source,
            )
            .unwrap();
        wizard.dispatch(Intent::Advance, &source).unwrap();
        assert_eq!(wizard.step(), WizardStep::Summary);
    }

    #[test]
    fn dispatch_unknown_project_notifies() {
        let source = crate::source::InMemoryProjects::new(vec![]);
        let notifier = Arc::new(MemoryNotifier::new());
        let mut wizard = Wizard::new(notifier.clone());
        let err = wizard
            .dispatch(Intent::SelectProject { project_id: "nope".into() }, &source)
            .unwrap_err();
        assert_eq!(err, WizardError::ProjectNotFound("nope".into()));
        assert_eq!(notifier.last().unwrap().description, "Project not found: nope");
    }
}
