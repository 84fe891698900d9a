use num_traits::ToPrimitive;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::features::ast::{AstHub, NodeRef, NodeType};
use crate::features::constants::{parse_number_literal, LiteralValue};
use crate::features::targets::domain::{
    ContractKind, ContractTarget, FunctionTarget, Mutability, Parameter, Target, TypeDescriptor,
    Visibility,
};
use crate::features::traversal::{traverse, AstVisitor, VisitFlow};
use crate::shared::models::{AnalysisError, Result};

/// Collects contract and function targets of one file
pub struct TargetExtractor {
    /// Contract names declared in the file
    contracts: FxHashSet<String>,
    current: Vec<ContractTarget>,
    targets: Vec<Target>,
}

impl TargetExtractor {
    pub fn extract(hub: &AstHub) -> Result<Vec<Target>> {
        let root = hub.root()?;
        let contracts = root
            .children_of("children")
            .iter()
            .filter(|child| child.is_type(NodeType::ContractDefinition))
            .filter_map(|child| child.str_attr("name").map(str::to_string))
            .collect();

        let mut extractor = TargetExtractor {
            contracts,
            current: Vec::new(),
            targets: Vec::new(),
        };
        traverse(&root, &mut extractor)
            .map_err(|e| match e.file_path {
                Some(_) => e,
                None => e.with_file(hub.file_path().to_string()),
            })?;
        debug!(file = %hub.file_path(), targets = extractor.targets.len(), "targets extracted");
        Ok(extractor.targets)
    }

    fn contract(&self, node: &NodeRef<'_>) -> Result<ContractTarget> {
        let bases = node
            .children_of("baseContracts")
            .iter()
            .filter_map(|base| base.child("baseName"))
            .filter_map(|name| name.str_attr("namePath").map(str::to_string))
            .collect();
        Ok(ContractTarget {
            id: node.id()?,
            name: node.str_attr("name").unwrap_or_default().to_string(),
            kind: ContractKind::from_tag(node.str_attr("kind").unwrap_or("contract")),
            bases,
        })
    }

    fn function(&self, node: &NodeRef<'_>, contract: &ContractTarget) -> Result<FunctionTarget> {
        let is_constructor = node.bool_attr("isConstructor");
        let is_fallback = node.bool_attr("isFallback");
        let is_receive = node.bool_attr("isReceiveEther");
        let name = match node.str_attr("name") {
            _ if is_constructor => "constructor".to_string(),
            _ if is_receive => "receive".to_string(),
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "fallback".to_string(),
        };

        let overrides = node
            .children_of("override")
            .iter()
            .filter_map(|o| o.str_attr("namePath").map(str::to_string))
            .collect();
        let modifiers = node
            .children_of("modifiers")
            .iter()
            .filter_map(|m| m.str_attr("name").map(str::to_string))
            .collect();

        Ok(FunctionTarget {
            id: node.id()?,
            contract_id: contract.id.clone(),
            name,
            visibility: Visibility::from_tag(node.str_attr("visibility")),
            is_constructor,
            is_fallback,
            is_receive,
            parameters: self.parameters(node, "parameters")?,
            return_parameters: self.parameters(node, "returnParameters")?,
            mutability: Mutability::from_tag(node.str_attr("stateMutability")),
            is_virtual: node.bool_attr("isVirtual"),
            overrides,
            modifiers,
            implicit: false,
        })
    }

    fn parameters(&self, node: &NodeRef<'_>, key: &str) -> Result<Vec<Parameter>> {
        node.children_of(key)
            .iter()
            .map(|parameter| {
                let type_name = required(parameter, "typeName")?;
                Ok(Parameter::new(
                    parameter
                        .str_attr("name")
                        .filter(|n| !n.is_empty())
                        .map(str::to_string),
                    resolve_type_name(&type_name, &self.contracts)?,
                ))
            })
            .collect()
    }
}

impl<'a> AstVisitor<'a> for TargetExtractor {
    fn enter(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        match node.node_type() {
            NodeType::SourceUnit => Ok(VisitFlow::Continue),
            NodeType::ContractDefinition => {
                let contract = self.contract(node)?;
                self.targets.push(Target::Contract(contract.clone()));
                self.current.push(contract);
                Ok(VisitFlow::Continue)
            }
            NodeType::FunctionDefinition => {
                // Free functions are not callable from a test
                if let Some(contract) = self.current.last() {
                    let function = self.function(node, contract)?;
                    self.targets.push(Target::Function(function));
                }
                Ok(VisitFlow::Skip)
            }
            _ => Ok(VisitFlow::Skip),
        }
    }

    fn exit(&mut self, node: &NodeRef<'a>) -> Result<()> {
        if node.is_type(NodeType::ContractDefinition) {
            self.current.pop();
        }
        Ok(())
    }
}

/// Descriptor of a type-name node
///
/// `contracts` decides whether a user-defined name is a contract reference.
pub fn resolve_type_name(node: &NodeRef<'_>, contracts: &FxHashSet<String>) -> Result<TypeDescriptor> {
    match node.node_type() {
        NodeType::ElementaryTypeName => {
            let name = node.str_attr("name").unwrap_or_default();
            let payable = node.str_attr("stateMutability") == Some("payable");
            TypeDescriptor::elementary(name, payable).ok_or_else(|| {
                AnalysisError::extraction(format!("unknown elementary type '{}'", name))
            })
        }
        NodeType::UserDefinedTypeName => {
            let name = node.str_attr("namePath").unwrap_or_default().to_string();
            if contracts.contains(&name) {
                Ok(TypeDescriptor::Contract { name })
            } else {
                Ok(TypeDescriptor::UserDefined { name })
            }
        }
        NodeType::FunctionTypeName => Ok(TypeDescriptor::Function),
        NodeType::Mapping => {
            let key = required(node, "keyType")?;
            let value = required(node, "valueType")?;
            Ok(TypeDescriptor::Mapping {
                key: Box::new(resolve_type_name(&key, contracts)?),
                value: Box::new(resolve_type_name(&value, contracts)?),
            })
        }
        NodeType::ArrayTypeName => {
            let base = required(node, "baseTypeName")?;
            let length = node
                .child("length")
                .and_then(|length| length.str_attr("number").and_then(|n| parse_number_literal(n, None)))
                .and_then(|value| match value {
                    LiteralValue::Integer(value) => value.to_usize(),
                    _ => None,
                });
            Ok(TypeDescriptor::Array {
                base: Box::new(resolve_type_name(&base, contracts)?),
                length,
            })
        }
        other => Err(AnalysisError::extraction(format!(
            "'{}' is not a type name",
            other.as_str()
        ))),
    }
}

fn required<'a>(node: &NodeRef<'a>, key: &str) -> Result<NodeRef<'a>> {
    node.child(key).ok_or_else(|| {
        AnalysisError::extraction(format!("{} without {}", node.node_type().as_str(), key))
    })
}
