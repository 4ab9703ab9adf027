//! Domain models for project initialization.
//!
//! # Core Concepts
//!
//! - [`Project`]: The source project, with free-text goals and competitor
//!   [`Reference`]s. Supplied by a curator, read-only to the wizard.
//! - [`Feature`]: A proposed capability, either suggested from the project's
//!   goals or entered by hand.
//! - [`UserFlow`]: A usage scenario under exactly one feature, holding
//!   snapshot copies of the references that back it.
//! - [`WizardStep`]: Where a wizard session currently is.
//!
//! Every edit goes through a tagged update ([`FeatureUpdate`],
//! [`FlowUpdate`], [`GoalEdit`]) and produces a new value.

mod feature;
mod project;
mod step;
mod user_flow;

pub use feature::*;
pub use project::*;
pub use step::*;
pub use user_flow::*;
