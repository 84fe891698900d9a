//! Generic depth-first traversal engine
//!
//! Handlers are dispatched on the closed [`NodeType`] enumeration instead of
//! string tags: implement [`AstVisitor::enter`] / [`AstVisitor::exit`] as a
//! `match` and override the group handlers where needed.
//!
//! [`NodeType`]: crate::features::ast::NodeType

pub mod domain;
pub mod infrastructure;

pub use domain::VisitFlow;
pub use infrastructure::{traverse, traverse_all, AstVisitor};
