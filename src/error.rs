//! Wizard errors and their mapping to user-facing notices.

use thiserror::Error;
use uuid::Uuid;

use crate::models::WizardStep;
use crate::notify::{Notice, Severity};

/// Errors raised by wizard operations.
///
/// None of these are fatal. The wizard state is left as it was and the
/// caller is expected to show the matching [`Notice`] and let the user
/// correct the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Please add at least one feature with name and description")]
    NoValidFeatures,

    #[error("Please add at least one user flow with name and description")]
    NoValidUserFlows,

    #[error("Some user flows don't have any references attached. Each flow should have at least one reference.")]
    FlowsWithoutReferences { flow_ids: Vec<Uuid> },

    #[error("This reference is already attached to this user flow")]
    DuplicateAttachment { reference_id: String },

    #[error("Cannot {action} from step {step}")]
    InvalidTransition {
        action: &'static str,
        step: WizardStep,
    },

    #[error("No project selected")]
    NoProjectSelected,

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("User flow not found: {0}")]
    UserFlowNotFound(String),

    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    /// Input rejected by project review or project creation.
    #[error("{0}")]
    InvalidProject(String),
}

/// Coarse classification used to pick a notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    ReferentialWarning,
    DuplicateAttachment,
}

impl WizardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FlowsWithoutReferences { .. } => ErrorKind::ReferentialWarning,
            Self::DuplicateAttachment { .. } => ErrorKind::DuplicateAttachment,
            _ => ErrorKind::Validation,
        }
    }

    pub fn to_notice(&self) -> Notice {
        let (title, severity) = match self.kind() {
            ErrorKind::ReferentialWarning => ("Warning", Severity::Warning),
            ErrorKind::DuplicateAttachment => ("Reference already attached", Severity::Warning),
            ErrorKind::Validation => match self {
                Self::InvalidProject(_) => ("Validation Error", Severity::Error),
                _ => ("Error", Severity::Error),
            },
        };
        Notice::new(title, self.to_string(), severity)
    }
}
