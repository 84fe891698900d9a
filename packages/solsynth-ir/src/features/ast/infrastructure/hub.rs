//! Per-file AST context
//!
//! Owns the parser output, the source text and the file path. Node references
//! borrow from the hub, so the tree is never copied or mutated.

use serde_json::Value;

use super::node_ref::NodeRef;
use crate::features::ast::domain::NodeType;
use crate::shared::models::{AnalysisError, Result};

/// Shared per-file context for node references
#[derive(Debug, Clone)]
pub struct AstHub {
    file_path: String,
    source: String,
    ast: Value,
}

impl AstHub {
    pub fn new(file_path: impl Into<String>, source: impl Into<String>, ast: Value) -> Self {
        Self {
            file_path: file_path.into(),
            source: source.into(),
            ast,
        }
    }

    /// Build a hub from the parser's JSON output
    pub fn from_json(
        file_path: impl Into<String>,
        source: impl Into<String>,
        ast_json: &str,
    ) -> Result<Self> {
        let file_path = file_path.into();
        let ast: Value = serde_json::from_str(ast_json)
            .map_err(|e| AnalysisError::from(e).with_file(file_path.clone()))?;
        Ok(Self::new(file_path, source, ast))
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn raw(&self) -> &Value {
        &self.ast
    }

    /// Wrap the root node
    ///
    /// The whole tree is checked against the closed node vocabulary first;
    /// navigation below the root never meets an unknown tag afterwards.
    pub fn root(&self) -> Result<NodeRef<'_>> {
        self.validate(&self.ast)?;
        NodeRef::wrap(&self.ast, self, None).ok_or_else(|| {
            AnalysisError::ast("AST root is not a typed node").with_file(self.file_path.clone())
        })
    }

    fn validate(&self, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => {
                if let Some(tag) = map.get("type").and_then(Value::as_str) {
                    if NodeType::from_tag(tag).is_none() {
                        return Err(AnalysisError::ast(format!("unknown node type '{}'", tag))
                            .with_file(self.file_path.clone()));
                    }
                } else {
                    // Attribute objects (loc, ...) carry no nodes
                    return Ok(());
                }
                for (key, field) in map {
                    if key == "loc" || key == "range" {
                        continue;
                    }
                    self.validate(field)?;
                }
                Ok(())
            }
            Value::Array(items) => items.iter().try_for_each(|item| self.validate(item)),
            _ => Ok(()),
        }
    }
}
