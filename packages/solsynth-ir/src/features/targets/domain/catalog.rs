//! Project-wide target catalog

use std::collections::BTreeMap;

use super::target::{ContractTarget, FunctionTarget, Target};

/// Targets grouped by source file, in declaration order per file
#[derive(Debug, Clone, Default)]
pub struct TargetCatalog {
    files: BTreeMap<String, Vec<Target>>,
}

impl TargetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the targets of one file
    pub fn add_file(&mut self, file_path: impl Into<String>, targets: Vec<Target>) {
        self.files.insert(file_path.into(), targets);
    }

    pub fn merge(&mut self, other: TargetCatalog) {
        self.files.extend(other.files);
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn targets_of(&self, file_path: &str) -> &[Target] {
        self.files.get(file_path).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.files.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<&Target> {
        self.targets().find(|target| target.id() == id)
    }

    pub fn contract(&self, id: &str) -> Option<&ContractTarget> {
        self.get(id).and_then(Target::as_contract)
    }

    pub fn contract_by_name(&self, name: &str) -> Option<&ContractTarget> {
        self.contracts().find(|contract| contract.name == name)
    }

    pub fn function(&self, id: &str) -> Option<&FunctionTarget> {
        self.get(id).and_then(Target::as_function)
    }

    pub fn contracts(&self) -> impl Iterator<Item = &ContractTarget> {
        self.targets().filter_map(Target::as_contract)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionTarget> {
        self.targets().filter_map(Target::as_function)
    }

    pub fn deployable_contracts(&self) -> Vec<&ContractTarget> {
        self.contracts().filter(|c| c.is_deployable()).collect()
    }

    /// Public / external functions of deployable contracts
    pub fn actionable_functions(&self) -> Vec<&FunctionTarget> {
        self.functions()
            .filter(|f| f.is_action())
            .filter(|f| self.contract(&f.contract_id).is_some_and(ContractTarget::is_deployable))
            .collect()
    }

    pub fn functions_of(&self, contract_id: &str) -> Vec<&FunctionTarget> {
        self.functions()
            .filter(|f| f.contract_id == contract_id)
            .collect()
    }

    /// Declared constructor, or an implicit zero-argument one
    ///
    /// `None` when the contract is unknown.
    pub fn constructor_of(&self, contract_id: &str) -> Option<FunctionTarget> {
        let contract = self.contract(contract_id)?;
        Some(
            self.functions()
                .find(|f| f.contract_id == contract_id && f.is_constructor)
                .cloned()
                .unwrap_or_else(|| FunctionTarget::implicit_constructor(contract)),
        )
    }
}
