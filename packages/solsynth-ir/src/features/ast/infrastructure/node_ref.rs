//! Navigable, type-discriminating view over raw parser nodes

use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};

use super::hub::AstHub;
use crate::features::ast::domain::{NodeGroup, NodeType};
use crate::shared::models::{AnalysisError, Position, Result, SourceLocation};
use crate::shared::IdGenerator;

/// AST-bearing field content
#[derive(Debug, Clone)]
pub enum Child<'a> {
    Single(NodeRef<'a>),
    Many(Vec<NodeRef<'a>>),
}

impl<'a> Child<'a> {
    pub fn into_vec(self) -> Vec<NodeRef<'a>> {
        match self {
            Child::Single(node) => vec![node],
            Child::Many(nodes) => nodes,
        }
    }

    pub fn single(self) -> Option<NodeRef<'a>> {
        match self {
            Child::Single(node) => Some(node),
            Child::Many(_) => None,
        }
    }
}

/// Reference to one AST node
///
/// Carries the parent reference and the per-file hub. Cloning is cheap: the
/// raw node is borrowed and the parent chain is reference counted.
#[derive(Clone)]
pub struct NodeRef<'a> {
    raw: &'a Map<String, Value>,
    node_type: NodeType,
    hub: &'a AstHub,
    parent: Option<Rc<NodeRef<'a>>>,
}

impl<'a> NodeRef<'a> {
    /// Wrap a raw value; `None` when it is not a typed node
    pub(crate) fn wrap(
        value: &'a Value,
        hub: &'a AstHub,
        parent: Option<Rc<NodeRef<'a>>>,
    ) -> Option<Self> {
        let raw = value.as_object()?;
        let node_type = raw
            .get("type")
            .and_then(Value::as_str)
            .and_then(NodeType::from_tag)?;
        Some(Self {
            raw,
            node_type,
            hub,
            parent,
        })
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn hub(&self) -> &'a AstHub {
        self.hub
    }

    pub fn raw(&self) -> &'a Map<String, Value> {
        self.raw
    }

    pub fn parent(&self) -> Option<&NodeRef<'a>> {
        self.parent.as_deref()
    }

    /// Closest ancestor of the given type
    pub fn find_ancestor(&self, node_type: NodeType) -> Option<NodeRef<'a>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.node_type == node_type {
                return Some(node.clone());
            }
            current = node.parent();
        }
        None
    }

    /// Whether `key` holds an AST-bearing field
    pub fn has(&self, key: &str) -> bool {
        self.raw.get(key).map(is_ast_field).unwrap_or(false)
    }

    /// AST-bearing field access
    ///
    /// Returns `None` for missing fields, `null`, and attribute fields.
    pub fn get(&self, key: &str) -> Option<Child<'a>> {
        let value = self.raw.get(key)?;
        if !is_ast_field(value) {
            return None;
        }
        let parent = Rc::new(self.clone());
        self.wrap_field(value, &parent)
    }

    /// Single child node under `key`
    pub fn child(&self, key: &str) -> Option<NodeRef<'a>> {
        self.get(key).and_then(Child::single)
    }

    /// Child nodes under `key`, empty when absent
    pub fn children_of(&self, key: &str) -> Vec<NodeRef<'a>> {
        self.get(key).map(Child::into_vec).unwrap_or_default()
    }

    /// Every AST-bearing field in parser order
    pub fn fields(&self) -> Vec<(&'a str, Child<'a>)> {
        let parent = Rc::new(self.clone());
        self.raw
            .iter()
            .filter(|(key, value)| key.as_str() != "loc" && key.as_str() != "range" && is_ast_field(value))
            .filter_map(|(key, value)| {
                self.wrap_field(value, &parent)
                    .map(|child| (key.as_str(), child))
            })
            .collect()
    }

    fn wrap_field(&self, value: &'a Value, parent: &Rc<NodeRef<'a>>) -> Option<Child<'a>> {
        match value {
            Value::Object(_) => {
                NodeRef::wrap(value, self.hub, Some(Rc::clone(parent))).map(Child::Single)
            }
            Value::Array(items) => Some(Child::Many(
                items
                    .iter()
                    .filter_map(|item| NodeRef::wrap(item, self.hub, Some(Rc::clone(parent))))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Non-AST attribute value
    pub fn attribute(&self, key: &str) -> Option<&'a Value> {
        self.raw.get(key).filter(|value| !is_ast_field(value))
    }

    pub fn str_attr(&self, key: &str) -> Option<&'a str> {
        self.attribute(key).and_then(Value::as_str)
    }

    pub fn bool_attr(&self, key: &str) -> bool {
        self.attribute(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Source location from `loc` + `range`
    ///
    /// Nodes without position data violate the parser contract.
    pub fn location(&self) -> Result<SourceLocation> {
        let missing = || {
            AnalysisError::ast(format!("{} node has no source location", self.node_type))
                .with_file(self.hub.file_path())
        };
        let loc = self.raw.get("loc").ok_or_else(missing)?;
        let range = self
            .raw
            .get("range")
            .and_then(Value::as_array)
            .ok_or_else(missing)?;

        let position = |key: &str| -> Option<Position> {
            let point = loc.get(key)?;
            Some(Position::new(
                point.get("line")?.as_u64()? as u32,
                point.get("column")?.as_u64()? as u32,
            ))
        };

        let start = position("start").ok_or_else(missing)?;
        let end = position("end").ok_or_else(missing)?;
        let start_offset = range.first().and_then(Value::as_u64).ok_or_else(missing)? as usize;
        let end_offset = range.get(1).and_then(Value::as_u64).ok_or_else(missing)? as usize;

        Ok(SourceLocation::new(start, end, start_offset, end_offset))
    }

    /// Raw source text of the node
    pub fn source(&self) -> Result<&'a str> {
        let location = self.location()?;
        self.hub
            .source()
            .get(location.start_offset..=location.end_offset)
            .ok_or_else(|| {
                AnalysisError::ast(format!(
                    "{} range {}..={} outside source",
                    self.node_type, location.start_offset, location.end_offset
                ))
                .with_file(self.hub.file_path())
                .with_line(location.start.line)
            })
    }

    /// Location-derived unique id
    pub fn id(&self) -> Result<String> {
        Ok(IdGenerator::generate_location_id(
            self.hub.file_path(),
            &self.location()?,
        ))
    }

    pub fn is(&self, group: NodeGroup) -> bool {
        group.contains(self.node_type)
    }

    pub fn is_type(&self, node_type: NodeType) -> bool {
        self.node_type == node_type
    }

    pub fn is_statement(&self) -> bool {
        self.node_type.is_statement()
    }

    pub fn is_expression(&self) -> bool {
        self.node_type.is_expression()
    }

    pub fn is_primary_expression(&self) -> bool {
        self.node_type.is_primary_expression()
    }

    pub fn is_literal(&self) -> bool {
        self.node_type.is_literal()
    }

    pub fn is_loop(&self) -> bool {
        self.node_type.is_loop()
    }

    pub fn is_definition(&self) -> bool {
        self.node_type.is_definition()
    }

    pub fn is_type_name(&self) -> bool {
        self.node_type.is_type_name()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("type", &self.node_type)
            .field("file", &self.hub.file_path())
            .field("range", &self.raw.get("range"))
            .finish()
    }
}

/// A field is AST-bearing when it is a typed node or an array whose
/// non-null elements are all typed nodes
fn is_ast_field(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.get("type").map(Value::is_string).unwrap_or(false),
        Value::Array(items) => items.iter().all(|item| match item {
            Value::Null => true,
            Value::Object(map) => map.get("type").map(Value::is_string).unwrap_or(false),
            _ => false,
        }),
        _ => false,
    }
}
