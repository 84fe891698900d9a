use serde_json::Value;
use tracing::debug;

use crate::features::ast::{AstHub, NodeRef, NodeType};
use crate::features::dependencies::domain::ImportDependency;
use crate::features::traversal::{traverse, AstVisitor, VisitFlow};
use crate::shared::models::{AnalysisError, Result};

/// Collects the import directives of one file
pub struct DependencyExtractor<'h> {
    file_path: &'h str,
    imports: Vec<ImportDependency>,
}

impl<'h> DependencyExtractor<'h> {
    pub fn extract(hub: &'h AstHub) -> Result<Vec<ImportDependency>> {
        let mut extractor = DependencyExtractor {
            file_path: hub.file_path(),
            imports: Vec::new(),
        };
        traverse(&hub.root()?, &mut extractor)?;
        debug!(file = %hub.file_path(), imports = extractor.imports.len(), "imports extracted");
        Ok(extractor.imports)
    }

    fn record(&mut self, node: &NodeRef<'_>) -> Result<()> {
        let path = node.str_attr("path").ok_or_else(|| {
            AnalysisError::extraction("import directive without a path")
                .with_file(self.file_path.to_string())
        })?;

        let mut dependency = ImportDependency::new(self.file_path, path);
        if let Some(alias) = node.str_attr("unitAlias") {
            dependency = dependency.with_unit_alias(alias);
        }
        if let Some(Value::Array(symbols)) = node.attribute("symbolAliases") {
            for symbol in symbols {
                let Some(pair) = symbol.as_array() else {
                    continue;
                };
                if let Some(name) = pair.first().and_then(Value::as_str) {
                    let alias = pair.get(1).and_then(Value::as_str).map(str::to_string);
                    dependency = dependency.with_symbol(name, alias);
                }
            }
        }
        self.imports.push(dependency);
        Ok(())
    }
}

impl<'a, 'h> AstVisitor<'a> for DependencyExtractor<'h> {
    fn enter(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        match node.node_type() {
            NodeType::SourceUnit => Ok(VisitFlow::Continue),
            NodeType::ImportDirective => {
                self.record(node)?;
                Ok(VisitFlow::Skip)
            }
            // Imports only appear at file level
            _ => Ok(VisitFlow::Skip),
        }
    }
}
