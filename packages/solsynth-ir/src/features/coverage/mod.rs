//! Coverage feedback
//!
//! - domain/: runner trace records, branch distance
//! - infrastructure/: approach level over function graphs
//! - application/: objective fitness from a trace

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ObjectiveFunction;
pub use domain::{
    branch_distance, ExecutionTrace, TraceKind, TraceLocation, TraceRecord, BRANCH_DISTANCE_TIE_BREAK,
};
