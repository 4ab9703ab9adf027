use serde::{Deserialize, Serialize};

/// A step of the initialization wizard.
///
/// Numbering starts at 2: step 1 (project creation) happens outside the
/// wizard, in the curator that supplies projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Select or review the source project.
    SelectProject,
    /// Edit the feature list.
    DefineFeatures,
    /// Define user flows per feature.
    DefineUserFlows,
    /// Review everything. Terminal.
    Summary,
}

impl WizardStep {
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::SelectProject,
            WizardStep::DefineFeatures,
            WizardStep::DefineUserFlows,
            WizardStep::Summary,
        ]
    }

    pub fn number(&self) -> u8 {
        match self {
            Self::SelectProject => 2,
            Self::DefineFeatures => 3,
            Self::DefineUserFlows => 4,
            Self::Summary => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            2 => Some(Self::SelectProject),
            3 => Some(Self::DefineFeatures),
            4 => Some(Self::DefineUserFlows),
            5 => Some(Self::Summary),
            _ => None,
        }
    }

    /// Label shown in the step indicator.
    pub fn title(&self) -> &'static str {
        match self {
            Self::SelectProject => "Initialize",
            Self::DefineFeatures => "Features",
            Self::DefineUserFlows => "User Flows",
            Self::Summary => "Finalize",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelectProject => "select_project",
            Self::DefineFeatures => "define_features",
            Self::DefineUserFlows => "define_user_flows",
            Self::Summary => "summary",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}
