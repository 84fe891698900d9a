//! Shared models

mod error;
mod location;

pub use error::{AnalysisError, ErrorKind, Result};
pub use location::{Position, SourceLocation};

/// Node identifier type alias (graph nodes, objectives, targets)
pub type NodeId = String;
