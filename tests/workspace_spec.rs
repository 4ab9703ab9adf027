//! Simulated workspace tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use project_init::error::WizardError;
use project_init::models::*;
use project_init::notify::{MemoryNotifier, Notifier, Severity};
use project_init::source::lets_solve_it;
use project_init::summary::ProjectSummary;
use project_init::wizard::WizardState;
use project_init::workspace::{self, SimulatedWorkspace, Workspace};

fn setup() -> (Arc<dyn Workspace>, Arc<MemoryNotifier>) {
    let ws: Arc<dyn Workspace> = Arc::new(SimulatedWorkspace::new(Duration::from_millis(1500)));
    (ws, Arc::new(MemoryNotifier::new()))
}

/// Rejects every save and documentation request.
struct RejectingWorkspace;

#[async_trait]
impl Workspace for RejectingWorkspace {
    async fn create_project(&self, input: CreateProjectInput) -> Result<Project, WizardError> {
        Err(WizardError::InvalidProject(format!("{} is read-only", input.name)))
    }

    async fn save_project(&self, _summary: &ProjectSummary) -> Result<(), WizardError> {
        Err(WizardError::FlowsWithoutReferences { flow_ids: vec![] })
    }

    async fn generate_documentation(&self, _summary: &ProjectSummary) -> Result<String, WizardError> {
        Err(WizardError::NoValidUserFlows)
    }
}

fn summary() -> ProjectSummary {
    let state = WizardState::default()
        .select_project(lets_solve_it())
        .expect("Failed to select project");
    ProjectSummary::from_state(&state).expect("No summary")
}

fn as_notifier(notifier: &Arc<MemoryNotifier>) -> Arc<dyn Notifier> {
    notifier.clone()
}

mod create_project {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn creates_project_after_delay() {
        let (ws, notifier) = setup();
        let started = tokio::time::Instant::now();

        let project = workspace::spawn_create_project(
            ws,
            as_notifier(&notifier),
            CreateProjectInput {
                name: "Case Tracker".to_string(),
                goals: vec!["Track cases".to_string(), "".to_string()],
                references: vec!["Clio dashboard".to_string()],
            },
        )
        .await
        .expect("task panicked")
        .expect("project not created");

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(project.name, "Case Tracker");
        assert_eq!(project.goals, vec!["Track cases"]);
        assert_eq!(project.references[0].title, "Clio dashboard");
        assert!(project.references[0].id.starts_with("ref-"));
        assert_eq!(notifier.last().unwrap().title, "Project Created");
    }

    #[tokio::test(start_paused = true)]
    async fn reports_validation_failure() {
        let (ws, notifier) = setup();

        let result = workspace::spawn_create_project(
            ws,
            as_notifier(&notifier),
            CreateProjectInput {
                name: "".to_string(),
                goals: vec!["Goal".to_string()],
                references: vec![],
            },
        )
        .await
        .expect("task panicked");

        assert!(result.is_none());
        let notice = notifier.last().unwrap();
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.description, "Project name is required");
    }
}

mod direct_calls {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn create_rejects_missing_goals() {
        let ws = SimulatedWorkspace::default();
        let err = tokio_test::assert_err!(
            ws.create_project(CreateProjectInput {
                name: "Intake".to_string(),
                goals: vec!["  ".to_string()],
                references: vec![],
            })
            .await
        );
        assert_eq!(err.to_string(), "At least one goal is required");
    }

    #[tokio::test(start_paused = true)]
    async fn save_succeeds() {
        let ws = SimulatedWorkspace::default();
        tokio_test::assert_ok!(ws.save_project(&summary()).await);
    }
}

mod save_and_document {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn save_posts_notice() {
        let (ws, notifier) = setup();
        workspace::spawn_save_project(ws, as_notifier(&notifier), summary())
            .await
            .expect("task panicked");
        assert_eq!(notifier.last().unwrap().title, "Project Saved");
    }

    #[tokio::test(start_paused = true)]
    async fn documentation_is_markdown() {
        let (ws, notifier) = setup();
        let doc = workspace::spawn_generate_documentation(ws, as_notifier(&notifier), summary())
            .await
            .expect("task panicked")
            .expect("no document");

        assert!(doc.starts_with("# Let's Solve It"));
        assert!(doc.contains("### AI Document Analyzer (High)"));
        assert_eq!(notifier.last().unwrap().title, "Documentation Generated");
    }

    #[tokio::test]
    async fn save_failure_notice_follows_error_kind() {
        let notifier = Arc::new(MemoryNotifier::new());
        workspace::spawn_save_project(Arc::new(RejectingWorkspace), as_notifier(&notifier), summary())
            .await
            .expect("task panicked");

        let notice = notifier.last().unwrap();
        let expected = WizardError::FlowsWithoutReferences { flow_ids: vec![] }.to_notice();
        assert_eq!(notice.title, "Warning");
        assert_eq!(notice.severity, Severity::Warning);
        assert_eq!(notice.description, expected.description);
    }

    #[tokio::test]
    async fn documentation_failure_notice_follows_error_kind() {
        let notifier = Arc::new(MemoryNotifier::new());
        let doc = workspace::spawn_generate_documentation(
            Arc::new(RejectingWorkspace),
            as_notifier(&notifier),
            summary(),
        )
        .await
        .expect("task panicked");

        assert!(doc.is_none());
        let notice = notifier.last().unwrap();
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.description, WizardError::NoValidUserFlows.to_string());
    }
}
