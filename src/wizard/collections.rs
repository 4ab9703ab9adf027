//! Copy-on-write operations over feature and flow lists.
//!
//! Every function takes a borrowed slice and returns a new `Vec`, so a
//! renderer holding the previous list never sees a half-applied edit.

use uuid::Uuid;

use crate::error::WizardError;
use crate::models::{Feature, FeatureUpdate, FlowUpdate, MoveDirection, UserFlow};

pub fn push<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(item);
    next
}

pub fn update_feature(
    features: &[Feature],
    id: Uuid,
    update: FeatureUpdate,
) -> Result<Vec<Feature>, WizardError> {
    if !features.iter().any(|f| f.id == id) {
        return Err(WizardError::FeatureNotFound(id.to_string()));
    }
    Ok(features
        .iter()
        .map(|f| if f.id == id { f.with(update.clone()) } else { f.clone() })
        .collect())
}

pub fn remove_feature(features: &[Feature], id: Uuid) -> Result<Vec<Feature>, WizardError> {
    if !features.iter().any(|f| f.id == id) {
        return Err(WizardError::FeatureNotFound(id.to_string()));
    }
    Ok(features.iter().filter(|f| f.id != id).cloned().collect())
}

/// Swap the feature with its neighbour. Moving past either end is a no-op.
pub fn move_feature(
    features: &[Feature],
    id: Uuid,
    direction: MoveDirection,
) -> Result<Vec<Feature>, WizardError> {
    let index = features
        .iter()
        .position(|f| f.id == id)
        .ok_or_else(|| WizardError::FeatureNotFound(id.to_string()))?;

    let mut next = features.to_vec();
    match direction {
        MoveDirection::Up if index > 0 => next.swap(index, index - 1),
        MoveDirection::Down if index + 1 < next.len() => next.swap(index, index + 1),
        _ => {}
    }
    Ok(next)
}

/// Replace the flow with `id` by the result of `f`.
pub fn replace_flow<F>(flows: &[UserFlow], id: Uuid, f: F) -> Result<Vec<UserFlow>, WizardError>
where
    F: FnOnce(&UserFlow) -> Result<UserFlow, WizardError>,
{
    let index = flows
        .iter()
        .position(|flow| flow.id == id)
        .ok_or_else(|| WizardError::UserFlowNotFound(id.to_string()))?;

    let replacement = f(&flows[index])?;
    let mut next = flows.to_vec();
    next[index] = replacement;
    Ok(next)
}

pub fn update_flow(
    flows: &[UserFlow],
    id: Uuid,
    update: FlowUpdate,
) -> Result<Vec<UserFlow>, WizardError> {
    replace_flow(flows, id, |flow| Ok(flow.with(update)))
}

pub fn remove_flow(flows: &[UserFlow], id: Uuid) -> Result<Vec<UserFlow>, WizardError> {
    if !flows.iter().any(|f| f.id == id) {
        return Err(WizardError::UserFlowNotFound(id.to_string()));
    }
    Ok(flows.iter().filter(|f| f.id != id).cloned().collect())
}

/// Drop flows whose feature is not in `features`.
pub fn retain_owned_flows(flows: &[UserFlow], features: &[Feature]) -> Vec<UserFlow> {
    flows
        .iter()
        .filter(|flow| features.iter().any(|f| f.id == flow.feature_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Feature {
        Feature::blank().with(FeatureUpdate::Name(name.to_string()))
    }

    fn names(features: &[Feature]) -> Vec<&str> {
        features.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn push_does_not_touch_input() {
        let features = vec![named("a")];
        let next = push(&features, named("b"));
        assert_eq!(features.len(), 1);
        assert_eq!(names(&next), vec!["a", "b"]);
    }

    #[test]
    fn move_swaps_neighbours() {
        let features = vec![named("a"), named("b"), named("c")];
        let moved = move_feature(&features, features[2].id, MoveDirection::Up).unwrap();
        assert_eq!(names(&moved), vec!["a", "c", "b"]);
        let moved = move_feature(&moved, features[0].id, MoveDirection::Down).unwrap();
        assert_eq!(names(&moved), vec!["c", "a", "b"]);
    }

    #[test]
    fn move_past_ends_is_noop() {
        let features = vec![named("a"), named("b")];
        let up = move_feature(&features, features[0].id, MoveDirection::Up).unwrap();
        let down = move_feature(&features, features[1].id, MoveDirection::Down).unwrap();
        assert_eq!(names(&up), vec!["a", "b"]);
        assert_eq!(names(&down), vec!["a", "b"]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let features = vec![named("a")];
        let missing = Uuid::new_v4();
        assert!(matches!(
            remove_feature(&features, missing),
            Err(WizardError::FeatureNotFound(_))
        ));
        assert!(matches!(
            update_flow(&[], missing, FlowUpdate::Name("x".into())),
            Err(WizardError::UserFlowNotFound(_))
        ));
    }

    #[test]
    fn retain_owned_flows_drops_orphans() {
        let kept = named("kept");
        let gone = named("gone");
        let flows = vec![UserFlow::new(kept.id), UserFlow::new(gone.id)];
        let retained = retain_owned_flows(&flows, &[kept.clone()]);
        assert_eq!(retained.len(), 1);
        assert_eq!(retained[0].feature_id, kept.id);
    }
}
