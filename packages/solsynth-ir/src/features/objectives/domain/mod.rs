mod objective;

pub use objective::{CoverageObjective, ObjectiveKind, ObjectiveModel};
