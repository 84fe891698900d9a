//! Container statements

use solsynth_ir::TypeDescriptor;
use uuid::Uuid;

use super::{Statement, StatementId};

/// Key/value pairs; children are `[key0, value0, key1, value1, ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct MappingStatement {
    pub id: StatementId,
    pub key_type: TypeDescriptor,
    pub value_type: TypeDescriptor,
    pub entries: Vec<(Statement, Statement)>,
}

impl MappingStatement {
    pub fn new(key_type: TypeDescriptor, value_type: TypeDescriptor, entries: Vec<(Statement, Statement)>) -> Self {
        Self {
            id: Uuid::new_v4(),
            key_type,
            value_type,
            entries,
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::Mapping {
            key: Box::new(self.key_type.clone()),
            value: Box::new(self.value_type.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStatement {
    pub id: StatementId,
    pub element_type: TypeDescriptor,
    /// Declared length of a static array
    pub length: Option<usize>,
    pub elements: Vec<Statement>,
}

impl ArrayStatement {
    pub fn new(element_type: TypeDescriptor, length: Option<usize>, elements: Vec<Statement>) -> Self {
        Self {
            id: Uuid::new_v4(),
            element_type,
            length,
            elements,
        }
    }

    pub fn type_descriptor(&self) -> TypeDescriptor {
        TypeDescriptor::Array {
            base: Box::new(self.element_type.clone()),
            length: self.length,
        }
    }
}
