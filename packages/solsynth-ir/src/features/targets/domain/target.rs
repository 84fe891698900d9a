//! Callable members of analyzed contracts

use serde::{Deserialize, Serialize};

use super::type_descriptor::TypeDescriptor;
use crate::shared::models::NodeId;
use crate::shared::IdGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Contract,
    Abstract,
    Interface,
    Library,
}

impl ContractKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "abstract" => ContractKind::Abstract,
            "interface" => ContractKind::Interface,
            "library" => ContractKind::Library,
            _ => ContractKind::Contract,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    External,
    Internal,
    Private,
    /// No explicit visibility (pre-0.5 functions are public)
    Default,
}

impl Visibility {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("public") => Visibility::Public,
            Some("external") => Visibility::External,
            Some("internal") => Visibility::Internal,
            Some("private") => Visibility::Private,
            _ => Visibility::Default,
        }
    }

    /// Callable from a transaction
    pub fn is_callable(self) -> bool {
        matches!(self, Visibility::Public | Visibility::External | Visibility::Default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutability {
    Pure,
    View,
    Payable,
    #[default]
    NonPayable,
}

impl Mutability {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("pure") => Mutability::Pure,
            Some("view") | Some("constant") => Mutability::View,
            Some("payable") => Mutability::Payable,
            _ => Mutability::NonPayable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Option<String>,
    pub type_descriptor: TypeDescriptor,
}

impl Parameter {
    pub fn new(name: Option<String>, type_descriptor: TypeDescriptor) -> Self {
        Self {
            name,
            type_descriptor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTarget {
    pub id: NodeId,
    pub name: String,
    pub kind: ContractKind,
    pub bases: Vec<String>,
}

impl ContractTarget {
    /// Can be deployed by a test
    pub fn is_deployable(&self) -> bool {
        self.kind == ContractKind::Contract
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionTarget {
    pub id: NodeId,
    pub contract_id: NodeId,
    pub name: String,
    pub visibility: Visibility,
    pub is_constructor: bool,
    pub is_fallback: bool,
    pub is_receive: bool,
    pub parameters: Vec<Parameter>,
    pub return_parameters: Vec<Parameter>,
    pub mutability: Mutability,
    pub is_virtual: bool,
    pub overrides: Vec<String>,
    pub modifiers: Vec<String>,
    /// Synthesized for contracts without a declared constructor
    #[serde(default)]
    pub implicit: bool,
}

impl FunctionTarget {
    /// Zero-argument constructor of a contract that declares none
    pub fn implicit_constructor(contract: &ContractTarget) -> Self {
        Self {
            id: IdGenerator::generate_synthetic_id(&contract.id, "constructor"),
            contract_id: contract.id.clone(),
            name: "constructor".to_string(),
            visibility: Visibility::Public,
            is_constructor: true,
            is_fallback: false,
            is_receive: false,
            parameters: Vec::new(),
            return_parameters: Vec::new(),
            mutability: Mutability::NonPayable,
            is_virtual: false,
            overrides: Vec::new(),
            modifiers: Vec::new(),
            implicit: true,
        }
    }

    /// Reachable as a test action (constructors are deployed, not called)
    pub fn is_action(&self) -> bool {
        self.visibility.is_callable() && !self.is_constructor && !self.is_fallback && !self.is_receive
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Target {
    Contract(ContractTarget),
    Function(FunctionTarget),
}

impl Target {
    pub fn id(&self) -> &str {
        match self {
            Target::Contract(contract) => &contract.id,
            Target::Function(function) => &function.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Target::Contract(contract) => &contract.name,
            Target::Function(function) => &function.name,
        }
    }

    pub fn as_contract(&self) -> Option<&ContractTarget> {
        match self {
            Target::Contract(contract) => Some(contract),
            Target::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionTarget> {
        match self {
            Target::Function(function) => Some(function),
            Target::Contract(_) => None,
        }
    }
}
