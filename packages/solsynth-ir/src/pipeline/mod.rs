//! Analysis pipeline
//!
//! One file: flow graphs → objectives, plus constants, imports and targets.
//! A project: every file on the rayon pool, then merged project-level views.

mod file_analyzer;
mod project_analyzer;

pub use file_analyzer::{FileAnalysis, FileAnalyzer, SourceFile};
pub use project_analyzer::{FileFailure, ProjectAnalysis, ProjectAnalyzer};
