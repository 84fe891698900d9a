//! Common test utilities for solsynth-ir
//!
//! Parser-shaped AST builder plus the small contracts the integration
//! tests share.

#![allow(dead_code)]

pub mod ast_builder;
mod fixtures;

pub use ast_builder::{AstBuilder, FunctionKind};
pub use fixtures::*;
