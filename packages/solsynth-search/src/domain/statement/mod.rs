//! Statement trees
//!
//! A statement exclusively owns its children. The same statement id can
//! occur at several places in one test case (pool reuse); decoding declares
//! it once and references it afterwards.

mod action;
mod complex;
mod mutation;
mod primitive;

pub use action::{ConstructorCall, FunctionCall};
pub use complex::{ArrayStatement, MappingStatement};
pub use primitive::{
    AddressStatement, AddressValue, BoolStatement, BytesStatement, IntegerStatement,
    NumericStatement, StringStatement,
};

use rand::{Rng, RngCore};
use rustc_hash::FxHashSet;
use solsynth_ir::TypeDescriptor;
use tracing::warn;
use uuid::Uuid;

use crate::error::{SearchError, SearchResult};

pub type StatementId = Uuid;

/// Id drawn from `rng`; a seeded search repeats its ids
pub fn fresh_id(rng: &mut dyn RngCore) -> StatementId {
    Uuid::from_u128(rng.gen())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Bool(BoolStatement),
    Integer(IntegerStatement),
    Numeric(NumericStatement),
    String(StringStatement),
    Bytes(BytesStatement),
    Address(AddressStatement),
    ConstructorCall(ConstructorCall),
    FunctionCall(FunctionCall),
    Mapping(MappingStatement),
    Array(ArrayStatement),
}

impl Statement {
    pub fn id(&self) -> StatementId {
        match self {
            Statement::Bool(s) => s.id,
            Statement::Integer(s) => s.id,
            Statement::Numeric(s) => s.id,
            Statement::String(s) => s.id,
            Statement::Bytes(s) => s.id,
            Statement::Address(s) => s.id,
            Statement::ConstructorCall(s) => s.id,
            Statement::FunctionCall(s) => s.id,
            Statement::Mapping(s) => s.id,
            Statement::Array(s) => s.id,
        }
    }

    /// Same statement under another id
    pub fn with_id(mut self, id: StatementId) -> Self {
        self.set_id(id);
        self
    }

    pub(crate) fn set_id(&mut self, id: StatementId) {
        match self {
            Statement::Bool(s) => s.id = id,
            Statement::Integer(s) => s.id = id,
            Statement::Numeric(s) => s.id = id,
            Statement::String(s) => s.id = id,
            Statement::Bytes(s) => s.id = id,
            Statement::Address(s) => s.id = id,
            Statement::ConstructorCall(s) => s.id = id,
            Statement::FunctionCall(s) => s.id = id,
            Statement::Mapping(s) => s.id = id,
            Statement::Array(s) => s.id = id,
        }
    }

    /// Semantic type of a value statement; `None` for function calls
    pub fn type_descriptor(&self) -> Option<TypeDescriptor> {
        match self {
            Statement::Bool(_) => Some(TypeDescriptor::Bool),
            Statement::Integer(s) => Some(s.type_descriptor()),
            Statement::Numeric(s) => Some(s.type_descriptor()),
            Statement::String(_) => Some(TypeDescriptor::String),
            Statement::Bytes(s) => Some(s.type_descriptor()),
            Statement::Address(s) => Some(s.type_descriptor()),
            Statement::ConstructorCall(s) => Some(TypeDescriptor::Contract {
                name: s.contract_name.clone(),
            }),
            Statement::FunctionCall(_) => None,
            Statement::Mapping(s) => Some(s.type_descriptor()),
            Statement::Array(s) => Some(s.type_descriptor()),
        }
    }

    /// Structural type identity; function calls use their return tuple
    pub fn type_string(&self) -> String {
        match self {
            Statement::FunctionCall(call) => call.return_type_string(),
            other => other
                .type_descriptor()
                .map(|t| t.type_string())
                .unwrap_or_default(),
        }
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Statement::ConstructorCall(_) | Statement::FunctionCall(_))
    }

    /// Whether `other` may take this statement's place in a tree
    ///
    /// Types must render the same; deployments must also be of the same
    /// contract, since owner slots check the contract id.
    pub fn is_interchangeable_with(&self, other: &Statement) -> bool {
        if self.is_action() != other.is_action() || self.type_string() != other.type_string() {
            return false;
        }
        match (self, other) {
            (Statement::ConstructorCall(a), Statement::ConstructorCall(b)) => {
                a.contract_id() == b.contract_id()
            }
            (Statement::ConstructorCall(_), _) | (_, Statement::ConstructorCall(_)) => false,
            _ => true,
        }
    }

    /// Short description for diagnostics
    pub fn label(&self) -> String {
        match self {
            Statement::ConstructorCall(call) => format!("deployment of {}", call.contract_name),
            Statement::FunctionCall(call) => format!("call of {}", call.function.name),
            other => format!("{} value", other.type_string()),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Children
    // ═══════════════════════════════════════════════════════════════════════

    /// Calls always own at least a sender
    pub fn has_children(&self) -> bool {
        match self {
            Statement::ConstructorCall(_) | Statement::FunctionCall(_) => true,
            Statement::Mapping(m) => !m.entries.is_empty(),
            Statement::Array(a) => !a.elements.is_empty(),
            _ => false,
        }
    }

    pub fn children(&self) -> Vec<&Statement> {
        match self {
            Statement::ConstructorCall(call) => {
                let mut children: Vec<&Statement> = call.arguments.iter().collect();
                children.push(&call.sender);
                children
            }
            Statement::FunctionCall(call) => {
                let mut children: Vec<&Statement> = call.arguments.iter().collect();
                children.push(&call.sender);
                children.push(&call.owner);
                children
            }
            Statement::Mapping(m) => m.entries.iter().flat_map(|(k, v)| [k, v]).collect(),
            Statement::Array(a) => a.elements.iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            Statement::ConstructorCall(call) => call.arguments.len() + 1,
            Statement::FunctionCall(call) => call.arguments.len() + 2,
            Statement::Mapping(m) => m.entries.len() * 2,
            Statement::Array(a) => a.elements.len(),
            _ => 0,
        }
    }

    pub fn child(&self, index: usize) -> Option<&Statement> {
        self.children().get(index).copied()
    }

    pub(crate) fn child_mut(&mut self, index: usize) -> Option<&mut Statement> {
        match self {
            Statement::ConstructorCall(call) => {
                let arguments = call.arguments.len();
                match index {
                    i if i < arguments => call.arguments.get_mut(i),
                    i if i == arguments => Some(call.sender.as_mut()),
                    _ => None,
                }
            }
            Statement::FunctionCall(call) => {
                let arguments = call.arguments.len();
                match index {
                    i if i < arguments => call.arguments.get_mut(i),
                    i if i == arguments => Some(call.sender.as_mut()),
                    i if i == arguments + 1 => Some(call.owner.as_mut()),
                    _ => None,
                }
            }
            Statement::Mapping(m) => m
                .entries
                .get_mut(index / 2)
                .map(|(k, v)| if index % 2 == 0 { k } else { v }),
            Statement::Array(a) => a.elements.get_mut(index),
            _ => None,
        }
    }

    /// Replace one child
    ///
    /// Fails on an index outside the child range or on a child whose kind or
    /// type does not fit the slot.
    pub fn set_child(&mut self, index: usize, child: Statement) -> SearchResult<()> {
        let count = self.child_count();
        if count == 0 {
            return Err(SearchError::new(
                crate::error::ErrorKind::InvalidChildIndex,
                format!("{} has no children (index {})", self.label(), index),
            ));
        }
        if index >= count {
            return Err(SearchError::invalid_child_index(index, count - 1, &self.label()));
        }
        self.check_child(index, &child)?;
        match self.child_mut(index) {
            Some(slot) => {
                *slot = child;
                Ok(())
            }
            None => Err(SearchError::internal(format!(
                "child slot {} of {} vanished",
                index,
                self.label()
            ))),
        }
    }

    fn check_child(&self, index: usize, child: &Statement) -> SearchResult<()> {
        match self {
            Statement::ConstructorCall(call) => match call.constructor.parameters.get(index) {
                Some(parameter) => expect_value(child, &parameter.type_descriptor),
                None => expect_sender(child),
            },
            Statement::FunctionCall(call) => {
                if let Some(parameter) = call.function.parameters.get(index) {
                    return expect_value(child, &parameter.type_descriptor);
                }
                if index == call.arguments.len() {
                    return expect_sender(child);
                }
                match child {
                    Statement::ConstructorCall(owner) if owner.contract_id() == call.function.contract_id => Ok(()),
                    other => Err(SearchError::wrong_child_kind(format!(
                        "owner of {} must deploy its contract, got {}",
                        call.function.name,
                        other.label()
                    ))),
                }
            }
            Statement::Mapping(m) => {
                let expected = if index % 2 == 0 { &m.key_type } else { &m.value_type };
                expect_value(child, expected)
            }
            Statement::Array(a) => expect_value(child, &a.element_type),
            _ => Ok(()),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Copy and walk
    // ═══════════════════════════════════════════════════════════════════════

    /// Deep copy keeping ids
    ///
    /// A child carrying the id of one of its ancestors is dropped from
    /// mappings and arrays; in a call slot, which cannot be left empty, it is
    /// copied under an id derived from its own.
    pub fn copy(&self) -> Statement {
        let mut ancestors = FxHashSet::default();
        self.copy_within(&mut ancestors)
    }

    fn copy_within(&self, ancestors: &mut FxHashSet<StatementId>) -> Statement {
        let id = self.id();
        let inserted = ancestors.insert(id);
        let copy = match self {
            Statement::ConstructorCall(call) => Statement::ConstructorCall(ConstructorCall {
                id,
                contract_name: call.contract_name.clone(),
                constructor: call.constructor.clone(),
                arguments: call.arguments.iter().map(|a| copy_slot(a, ancestors)).collect(),
                sender: Box::new(copy_slot(&call.sender, ancestors)),
            }),
            Statement::FunctionCall(call) => Statement::FunctionCall(FunctionCall {
                id,
                function: call.function.clone(),
                arguments: call.arguments.iter().map(|a| copy_slot(a, ancestors)).collect(),
                sender: Box::new(copy_slot(&call.sender, ancestors)),
                owner: Box::new(copy_slot(&call.owner, ancestors)),
            }),
            Statement::Mapping(m) => {
                let mut entries = Vec::with_capacity(m.entries.len());
                for (key, value) in &m.entries {
                    if ancestors.contains(&key.id()) || ancestors.contains(&value.id()) {
                        warn!(mapping = %id, "dropping mapping entry that refers to its own ancestor");
                        continue;
                    }
                    entries.push((key.copy_within(ancestors), value.copy_within(ancestors)));
                }
                Statement::Mapping(MappingStatement {
                    id,
                    key_type: m.key_type.clone(),
                    value_type: m.value_type.clone(),
                    entries,
                })
            }
            Statement::Array(a) => {
                let mut elements = Vec::with_capacity(a.elements.len());
                for element in &a.elements {
                    if ancestors.contains(&element.id()) {
                        warn!(array = %id, "dropping array element that refers to its own ancestor");
                        continue;
                    }
                    elements.push(element.copy_within(ancestors));
                }
                Statement::Array(ArrayStatement {
                    id,
                    element_type: a.element_type.clone(),
                    length: a.length,
                    elements,
                })
            }
            leaf => leaf.clone(),
        };
        if inserted {
            ancestors.remove(&id);
        }
        copy
    }

    /// Pre-order walk over the tree
    pub fn visit<'s>(&'s self, f: &mut dyn FnMut(&'s Statement)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Number of statements in the tree
    pub fn size(&self) -> usize {
        let mut size = 0;
        self.visit(&mut |_| size += 1);
        size
    }
}

fn copy_slot(child: &Statement, ancestors: &mut FxHashSet<StatementId>) -> Statement {
    if !ancestors.contains(&child.id()) {
        return child.copy_within(ancestors);
    }
    warn!(statement = %child.id(), "child refers to its own ancestor; copied under a derived id");
    let mut copy = child.copy_within(ancestors);
    copy.set_id(Uuid::new_v5(&child.id(), b"self-reference"));
    copy
}

fn expect_value(child: &Statement, expected: &TypeDescriptor) -> SearchResult<()> {
    let expected = expected.type_string();
    if child.is_action() || child.type_string() != expected {
        return Err(SearchError::wrong_child_kind(format!(
            "expected a {} value, got {}",
            expected,
            child.label()
        )));
    }
    Ok(())
}

fn expect_sender(child: &Statement) -> SearchResult<()> {
    match child {
        Statement::Address(_) => Ok(()),
        other => Err(SearchError::wrong_child_kind(format!(
            "sender must be an address, got {}",
            other.label()
        ))),
    }
}
