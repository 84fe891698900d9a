mod visitor;

pub use visitor::{traverse, traverse_all, AstVisitor};
