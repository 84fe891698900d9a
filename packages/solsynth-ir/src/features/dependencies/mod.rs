//! Import dependencies
//!
//! Per-file import lists and the project-level import graph.

pub mod domain;
pub mod infrastructure;

pub use domain::{DependencyGraph, ImportDependency};
pub use infrastructure::DependencyExtractor;
