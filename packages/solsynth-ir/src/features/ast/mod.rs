//! AST navigation
//!
//! - domain/: closed node-type vocabulary and group predicates
//! - infrastructure/: per-file hub and node references over parser JSON

pub mod domain;
pub mod infrastructure;

pub use domain::{NodeGroup, NodeType};
pub use infrastructure::{AstHub, Child, NodeRef};
