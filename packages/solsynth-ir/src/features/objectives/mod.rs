//! Coverage objectives
//!
//! Branch and function objectives derived from per-function control-flow
//! graphs, arranged as a forest for approach-level guidance.

pub mod domain;
pub mod infrastructure;

pub use domain::{CoverageObjective, ObjectiveKind, ObjectiveModel};
pub use infrastructure::ObjectiveExtractor;
