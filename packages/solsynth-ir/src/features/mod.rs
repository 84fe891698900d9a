//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure logic over analysis types
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - AST-driven implementations

pub mod ast;
pub mod traversal;

// Control flow and the objectives derived from it
pub mod flow_graph;
pub mod objectives;

// Literal, import and target extraction for the sampler
pub mod constants;
pub mod dependencies;
pub mod targets;

// Trace-based fitness
pub mod coverage;
