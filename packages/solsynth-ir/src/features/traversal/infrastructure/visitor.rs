/*
 * Visitor Pattern for AST Traversal
 *
 * Walk order per node:
 * - enter: Statement group, Expression group, then type-specific
 * - children: every AST-bearing field in parser order
 * - exit: Statement group, Expression group, then type-specific
 *
 * Any enter handler returning Skip prunes the subtree and suppresses the
 * exit handlers of that node. Handler errors abort the walk.
 */

use crate::features::ast::NodeRef;
use crate::features::traversal::domain::VisitFlow;
use crate::shared::models::Result;

/// AST Visitor trait
///
/// All handlers default to no-ops that continue the walk.
pub trait AstVisitor<'a> {
    fn enter_statement(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        let _ = node;
        Ok(VisitFlow::Continue)
    }

    fn exit_statement(&mut self, node: &NodeRef<'a>) -> Result<()> {
        let _ = node;
        Ok(())
    }

    fn enter_expression(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        let _ = node;
        Ok(VisitFlow::Continue)
    }

    fn exit_expression(&mut self, node: &NodeRef<'a>) -> Result<()> {
        let _ = node;
        Ok(())
    }

    /// Type-specific enter handler
    fn enter(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        let _ = node;
        Ok(VisitFlow::Continue)
    }

    /// Type-specific exit handler
    fn exit(&mut self, node: &NodeRef<'a>) -> Result<()> {
        let _ = node;
        Ok(())
    }
}

/// Traverse a subtree with a visitor
pub fn traverse<'a, V>(node: &NodeRef<'a>, visitor: &mut V) -> Result<()>
where
    V: AstVisitor<'a> + ?Sized,
{
    traverse_recursive(node, visitor)
}

/// Traverse a sequence of sibling subtrees in order
pub fn traverse_all<'a, V>(nodes: &[NodeRef<'a>], visitor: &mut V) -> Result<()>
where
    V: AstVisitor<'a> + ?Sized,
{
    for node in nodes {
        traverse_recursive(node, visitor)?;
    }
    Ok(())
}

fn traverse_recursive<'a, V>(node: &NodeRef<'a>, visitor: &mut V) -> Result<()>
where
    V: AstVisitor<'a> + ?Sized,
{
    let is_statement = node.is_statement();
    let is_expression = node.is_expression();

    // Enter
    if is_statement && visitor.enter_statement(node)?.is_skip() {
        return Ok(());
    }
    if is_expression && visitor.enter_expression(node)?.is_skip() {
        return Ok(());
    }
    if visitor.enter(node)?.is_skip() {
        return Ok(());
    }

    // Children
    for (_, child) in node.fields() {
        for child in child.into_vec() {
            traverse_recursive(&child, visitor)?;
        }
    }

    // Exit
    if is_statement {
        visitor.exit_statement(node)?;
    }
    if is_expression {
        visitor.exit_expression(node)?;
    }
    visitor.exit(node)
}
