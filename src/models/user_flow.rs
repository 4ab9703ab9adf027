use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Reference;
use crate::error::WizardError;

/// A concrete usage scenario belonging to exactly one feature.
///
/// The references held here are snapshots. Attaching copies the project's
/// reference, and the copy never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFlow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub feature_id: Uuid,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl UserFlow {
    /// A blank flow under `feature_id`, as produced by "Add User Flow".
    pub fn new(feature_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            feature_id,
            references: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.description.trim().is_empty()
    }

    pub fn has_reference(&self, reference_id: &str) -> bool {
        self.references.iter().any(|r| r.id == reference_id)
    }

    pub fn with(&self, update: FlowUpdate) -> Self {
        let mut next = self.clone();
        match update {
            FlowUpdate::Name(name) => next.name = name,
            FlowUpdate::Description(description) => next.description = description,
        }
        next
    }

    /// Returns a copy with `reference` appended.
    ///
    /// Fails with [`WizardError::DuplicateAttachment`] if a reference with the
    /// same id is already attached.
    pub fn with_reference(&self, reference: &Reference) -> Result<Self, WizardError> {
        if self.has_reference(&reference.id) {
            return Err(WizardError::DuplicateAttachment {
                reference_id: reference.id.clone(),
            });
        }
        let mut next = self.clone();
        next.references.push(reference.clone());
        Ok(next)
    }

    pub fn without_reference(&self, reference_id: &str) -> Self {
        let mut next = self.clone();
        next.references.retain(|r| r.id != reference_id);
        next
    }
}

/// A single field edit on a [`UserFlow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FlowUpdate {
    Name(String),
    Description(String),
}
