use tracing::{debug, warn};

use crate::features::ast::{AstHub, NodeRef, NodeType};
use crate::features::constants::domain::{parse_number_literal, ConstantPool};
use crate::features::traversal::{traverse, AstVisitor, VisitFlow};
use crate::shared::models::Result;

/// Collects literal constants of one file into a [`ConstantPool`]
#[derive(Debug, Default)]
pub struct ConstantExtractor {
    pool: ConstantPool,
}

impl ConstantExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract(hub: &AstHub) -> Result<ConstantPool> {
        let mut extractor = Self::new();
        traverse(&hub.root()?, &mut extractor)?;
        debug!(
            file = %hub.file_path(),
            constants = extractor.pool.len(),
            "constants extracted"
        );
        Ok(extractor.pool)
    }

    pub fn into_pool(self) -> ConstantPool {
        self.pool
    }

    fn record_number(&mut self, node: &NodeRef<'_>) {
        let Some(text) = node.str_attr("number") else {
            return;
        };
        let unit = node.str_attr("subdenomination");
        match parse_number_literal(text, unit) {
            Some(literal) if is_negated(node) => self.pool.add_literal(literal.negate()),
            Some(literal) => self.pool.add_literal(literal),
            None => warn!(literal = text, unit = ?unit, "unusable number literal skipped"),
        }
    }
}

impl<'a> AstVisitor<'a> for ConstantExtractor {
    fn enter(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        match node.node_type() {
            NodeType::NumberLiteral => self.record_number(node),
            NodeType::StringLiteral => {
                if let Some(value) = node.str_attr("value") {
                    self.pool.add_string(value);
                }
            }
            // Pragma versions and import paths are not program values
            NodeType::PragmaDirective | NodeType::ImportDirective => return Ok(VisitFlow::Skip),
            _ => {}
        }
        Ok(VisitFlow::Continue)
    }
}

/// `-<literal>` is a negative constant, not a unary operation on a positive one
fn is_negated(node: &NodeRef<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        parent.is_type(NodeType::UnaryOperation)
            && parent.str_attr("operator") == Some("-")
            && parent.bool_attr("isPrefix")
    })
}
