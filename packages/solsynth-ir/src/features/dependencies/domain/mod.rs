mod dependency_graph;
mod import;

pub use dependency_graph::DependencyGraph;
pub use import::{normalize_path, resolve_import, ImportDependency};
