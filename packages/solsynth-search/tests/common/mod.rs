#![allow(dead_code)]

//! Hand-built target catalogs and statements

use std::sync::Arc;

use num_bigint::BigInt;
use solsynth_ir::config::SamplingConfig;
use solsynth_ir::features::targets::{
    ContractKind, ContractTarget, FunctionTarget, Mutability, Parameter, Target, TargetCatalog,
    TypeDescriptor, Visibility,
};
use solsynth_ir::ConstantPool;
use solsynth_search::domain::{AddressStatement, AddressValue, IntegerStatement};
use solsynth_search::{RandomSampler, Statement};

pub const TOKEN: &str = "token";
pub const REGISTRY: &str = "registry";

pub fn uint256() -> TypeDescriptor {
    TypeDescriptor::Int {
        signed: false,
        bits: 256,
    }
}

pub fn contract(id: &str, name: &str, kind: ContractKind) -> ContractTarget {
    ContractTarget {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        bases: vec![],
    }
}

pub fn function(
    contract_id: &str,
    name: &str,
    parameters: Vec<TypeDescriptor>,
    returns: Vec<TypeDescriptor>,
) -> FunctionTarget {
    FunctionTarget {
        id: format!("{}.{}", contract_id, name),
        contract_id: contract_id.to_string(),
        name: name.to_string(),
        visibility: Visibility::Public,
        is_constructor: false,
        is_fallback: false,
        is_receive: false,
        parameters: parameters.into_iter().map(|t| Parameter::new(None, t)).collect(),
        return_parameters: returns.into_iter().map(|t| Parameter::new(None, t)).collect(),
        mutability: Mutability::NonPayable,
        is_virtual: false,
        overrides: vec![],
        modifiers: vec![],
        implicit: false,
    }
}

pub fn token_constructor() -> FunctionTarget {
    FunctionTarget {
        is_constructor: true,
        ..function(TOKEN, "constructor", vec![uint256()], vec![])
    }
}

pub fn transfer() -> FunctionTarget {
    function(
        TOKEN,
        "transfer",
        vec![TypeDescriptor::Address { payable: false }, uint256()],
        vec![TypeDescriptor::Bool],
    )
}

pub fn ping() -> FunctionTarget {
    function(REGISTRY, "ping", vec![], vec![TypeDescriptor::Bool])
}

/// Token(uint256) with transfer / setName / flags, a Registry with ping,
/// and an abstract Base
pub fn token_catalog() -> TargetCatalog {
    let mut fallback = function(TOKEN, "", vec![], vec![]);
    fallback.is_fallback = true;

    let mut catalog = TargetCatalog::new();
    catalog.add_file(
        "contracts/Token.sol",
        vec![
            Target::Contract(contract(TOKEN, "Token", ContractKind::Contract)),
            Target::Function(token_constructor()),
            Target::Function(transfer()),
            Target::Function(function(TOKEN, "setName", vec![TypeDescriptor::String], vec![])),
            Target::Function(function(
                TOKEN,
                "setFlags",
                vec![
                    TypeDescriptor::Bool,
                    TypeDescriptor::FixedBytes { size: 4 },
                    TypeDescriptor::Bytes,
                    TypeDescriptor::Int {
                        signed: true,
                        bits: 8,
                    },
                ],
                vec![],
            )),
            Target::Function(fallback),
        ],
    );
    catalog.add_file(
        "contracts/Registry.sol",
        vec![
            Target::Contract(contract("base", "Base", ContractKind::Abstract)),
            Target::Function(function("base", "hook", vec![], vec![])),
            Target::Contract(contract(REGISTRY, "Registry", ContractKind::Contract)),
            Target::Function(ping()),
        ],
    );
    catalog
}

/// `token_catalog` plus a function taking a contract reference
pub fn catalog_with_unsupported() -> TargetCatalog {
    let mut catalog = token_catalog();
    catalog.add_file(
        "contracts/Market.sol",
        vec![
            Target::Contract(contract("market", "Market", ContractKind::Contract)),
            Target::Function(function(
                "market",
                "list",
                vec![TypeDescriptor::Contract {
                    name: "Token".to_string(),
                }],
                vec![],
            )),
        ],
    );
    catalog
}

pub fn sampler(config: SamplingConfig) -> RandomSampler {
    sampler_with(token_catalog(), ConstantPool::new(), config)
}

pub fn sampler_with(
    catalog: TargetCatalog,
    constants: ConstantPool,
    config: SamplingConfig,
) -> RandomSampler {
    RandomSampler::new(Arc::new(catalog), Arc::new(constants), config).unwrap()
}

pub fn account(index: u32) -> Statement {
    Statement::Address(AddressStatement::new(false, AddressValue::Account(index)))
}

pub fn uint(value: i64) -> Statement {
    Statement::Integer(IntegerStatement::new(false, 256, BigInt::from(value)))
}
