//! Call statements: contract deployments and function calls
//!
//! Child order is fixed: arguments first, then the sender, then (function
//! calls only) the deployment the call is made on.

use solsynth_ir::features::targets::FunctionTarget;
use uuid::Uuid;

use super::{Statement, StatementId};

/// `Contract.new(args, { from: sender })`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorCall {
    pub id: StatementId,
    pub contract_name: String,
    /// Declared or implicit constructor
    pub constructor: FunctionTarget,
    pub arguments: Vec<Statement>,
    pub sender: Box<Statement>,
}

impl ConstructorCall {
    /// Deployment under a random id; samplers assign seeded ids
    pub fn new(
        contract_name: impl Into<String>,
        constructor: FunctionTarget,
        arguments: Vec<Statement>,
        sender: Statement,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_name: contract_name.into(),
            constructor,
            arguments,
            sender: Box::new(sender),
        }
    }

    pub fn contract_id(&self) -> &str {
        &self.constructor.contract_id
    }

    /// Highest valid child index (the sender)
    pub fn last_child_index(&self) -> usize {
        self.arguments.len()
    }
}

/// `owner.name(args, { from: sender })`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub id: StatementId,
    pub function: FunctionTarget,
    pub arguments: Vec<Statement>,
    pub sender: Box<Statement>,
    /// Deployment of the contract declaring `function`
    pub owner: Box<Statement>,
}

impl FunctionCall {
    /// Call under a random id; samplers assign seeded ids
    pub fn new(
        function: FunctionTarget,
        arguments: Vec<Statement>,
        sender: Statement,
        owner: Statement,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            function,
            arguments,
            sender: Box::new(sender),
            owner: Box::new(owner),
        }
    }

    /// Highest valid child index (the owner)
    pub fn last_child_index(&self) -> usize {
        self.arguments.len() + 1
    }

    /// Return types as a tuple: `()`, `(uint256)`, `(bool,address)`
    pub fn return_type_string(&self) -> String {
        let types: Vec<String> = self
            .function
            .return_parameters
            .iter()
            .map(|p| p.type_descriptor.type_string())
            .collect();
        format!("({})", types.join(","))
    }
}
