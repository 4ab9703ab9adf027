use serde::{Deserialize, Serialize};

use crate::models::{FeatureUpdate, FlowUpdate, MoveDirection, Priority};

/// One user action, as emitted by a form or read from a script.
///
/// Features and flows are addressed by name because their ids are only
/// generated once the wizard runs. The first entry with a matching
/// (trimmed) name is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    SelectProject {
        project_id: String,
    },
    Advance,
    Retreat,
    Reset,
    AddFeature {
        name: String,
        description: String,
        #[serde(default)]
        priority: Priority,
    },
    UpdateFeature {
        feature: String,
        update: FeatureUpdate,
    },
    RemoveFeature {
        feature: String,
    },
    MoveFeature {
        feature: String,
        direction: MoveDirection,
    },
    AddUserFlow {
        feature: String,
        name: String,
        description: String,
    },
    UpdateUserFlow {
        flow: String,
        update: FlowUpdate,
    },
    RemoveUserFlow {
        flow: String,
    },
    AttachReference {
        flow: String,
        reference_id: String,
    },
    DetachReference {
        flow: String,
        reference_id: String,
    },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectProject { .. } => "select_project",
            Self::Advance => "advance",
            Self::Retreat => "retreat",
            Self::Reset => "reset",
            Self::AddFeature { .. } => "add_feature",
            Self::UpdateFeature { .. } => "update_feature",
            Self::RemoveFeature { .. } => "remove_feature",
            Self::MoveFeature { .. } => "move_feature",
            Self::AddUserFlow { .. } => "add_user_flow",
            Self::UpdateUserFlow { .. } => "update_user_flow",
            Self::RemoveUserFlow { .. } => "remove_user_flow",
            Self::AttachReference { .. } => "attach_reference",
            Self::DetachReference { .. } => "detach_reference",
        }
    }
}
