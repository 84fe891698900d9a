/*
 * Solsynth IR - Solidity analysis for search-based test generation
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (errors, locations, ids)
 * - features/    : Vertical slices (ast → traversal → flow_graph → objectives,
 *                  constants, dependencies, targets, coverage)
 * - pipeline/    : Per-file and per-project orchestration
 * - config/      : Presets, section overrides, YAML
 *
 * Input is `@solidity-parser/parser` JSON; output is control-flow graphs,
 * a coverage objective forest, a constant pool, an import graph and a
 * target catalog.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Target and objective constructors carry many fields
#![allow(clippy::type_complexity)] // Per-file result vectors
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::collapsible_if)] // Readability over brevity
#![allow(clippy::collapsible_else_if)] // else if clarity
#![allow(clippy::single_match)] // Single match for readability
#![allow(clippy::match_like_matches_macro)] // Match for readability
#![allow(clippy::needless_lifetimes)] // Explicit lifetimes for clarity
#![allow(clippy::upper_case_acronyms)] // AST, CFG naming
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::unnecessary_map_or)] // map_or style for compatibility

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

#[cfg(test)]
#[path = "../tests/common/ast_builder.rs"]
pub(crate) mod ast_builder;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{Preset, SolsynthConfig, ValidatedConfig};
pub use features::ast::{AstHub, NodeRef, NodeType};
pub use features::constants::ConstantPool;
pub use features::coverage::{ExecutionTrace, ObjectiveFunction};
pub use features::flow_graph::{ControlFlowFunction, ControlFlowProgram};
pub use features::objectives::{CoverageObjective, ObjectiveKind, ObjectiveModel};
pub use features::targets::{
    ContractTarget, FunctionTarget, Parameter, Target, TargetCatalog, TypeDescriptor,
};
pub use pipeline::{FileAnalysis, FileAnalyzer, ProjectAnalysis, ProjectAnalyzer, SourceFile};
pub use shared::models::{AnalysisError, ErrorKind, Result};
