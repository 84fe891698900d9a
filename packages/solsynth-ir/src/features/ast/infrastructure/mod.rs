//! AST infrastructure over serde_json values

mod hub;
mod node_ref;

pub use hub::AstHub;
pub use node_ref::{Child, NodeRef};
