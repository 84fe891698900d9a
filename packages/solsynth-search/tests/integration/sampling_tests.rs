//! Random sampling: value bounds, pool reuse and unsupported types

#[path = "../common/mod.rs"]
mod common;

use common::{catalog_with_unsupported, sampler, sampler_with, token_catalog, transfer, uint, REGISTRY, TOKEN};
use num_bigint::BigInt;
use num_traits::One;
use proptest::prelude::*;
use solsynth_ir::config::SamplingConfig;
use solsynth_ir::{ConstantPool, TypeDescriptor};
use solsynth_search::domain::AddressValue;
use solsynth_search::{ErrorKind, Sampler, Statement, StatementPool};

const CAP: i64 = 2047;

fn expected_bounds(signed: bool, bits: u16) -> (BigInt, BigInt) {
    let type_max: BigInt = if signed {
        (BigInt::one() << (bits as usize - 1)) - 1
    } else {
        (BigInt::one() << bits as usize) - 1
    };
    let max = type_max.min(BigInt::from(CAP));
    let min = if signed { -max.clone() } else { BigInt::from(0) };
    (min, max)
}

proptest! {
    #[test]
    fn sampled_integers_stay_within_capped_bounds(
        seed in any::<u64>(),
        signed in any::<bool>(),
        width in 1u16..=32,
    ) {
        let bits = width * 8;
        let mut sampler = sampler(SamplingConfig::default().seed(seed));
        let (min, max) = expected_bounds(signed, bits);
        let type_descriptor = TypeDescriptor::Int { signed, bits };
        for _ in 0..20 {
            let statement = sampler
                .sample_argument(&type_descriptor, 0, &StatementPool::new())
                .unwrap();
            match statement {
                Statement::Integer(value) => {
                    prop_assert!(value.value >= min && value.value <= max, "{} outside [{}, {}]", value.value, min, max);
                    prop_assert_eq!(value.bits, bits);
                }
                other => prop_assert!(false, "expected an integer, got {:?}", other),
            }
        }
    }

    #[test]
    fn sampled_fixed_point_values_stay_within_capped_bounds(
        seed in any::<u64>(),
        signed in any::<bool>(),
        decimals in 0u8..=18,
    ) {
        let mut sampler = sampler(SamplingConfig::default().seed(seed));
        let scale = BigInt::from(10u32).pow(u32::from(decimals));
        let cap = BigInt::from(CAP) * &scale;
        let type_descriptor = TypeDescriptor::Fixed { signed, bits: 128, decimals };
        let statement = sampler
            .sample_argument(&type_descriptor, 0, &StatementPool::new())
            .unwrap();
        match statement {
            Statement::Numeric(value) => {
                prop_assert!(value.units <= cap);
                let floor = if signed { -cap.clone() } else { BigInt::from(0) };
                prop_assert!(value.units >= floor);
            }
            other => prop_assert!(false, "expected a fixed-point value, got {:?}", other),
        }
    }
}

#[test]
fn test_addresses_come_from_the_account_range() {
    let mut sampler = sampler(SamplingConfig::default().seed(9).account_index_range(-1, 2));
    let zero_padded_one = format!("0x{}1", "0".repeat(39));
    for _ in 0..100 {
        match sampler.sample_sender(&StatementPool::new()).unwrap() {
            Statement::Address(address) => match address.value {
                AddressValue::Account(index) => assert!(index <= 2),
                AddressValue::Literal(literal) => assert_eq!(literal, zero_padded_one),
            },
            other => panic!("expected an address, got {:?}", other),
        }
    }
}

#[test]
fn test_constant_pool_literals_are_used() {
    let mut constants = ConstantPool::new();
    constants.add_string("owner only");
    let config = SamplingConfig::default().seed(4).constant_pool_probability(1.0);
    let mut sampler = sampler_with(token_catalog(), constants, config);

    let statement = sampler
        .sample_argument(&TypeDescriptor::String, 0, &StatementPool::new())
        .unwrap();
    match statement {
        Statement::String(s) => assert_eq!(s.value, "owner only"),
        other => panic!("expected a string, got {:?}", other),
    }
}

#[test]
fn test_statement_pool_is_preferred() {
    let config = SamplingConfig::default().seed(2).statement_pool_probability(1.0);
    let mut sampler = sampler(config);
    let existing = uint(42);
    let pool = StatementPool::from_roots(&[existing.clone()]);

    let statement = sampler.sample_argument(&common::uint256(), 0, &pool).unwrap();
    assert_eq!(statement.id(), existing.id());
    assert_eq!(statement, existing);
}

#[test]
fn test_function_call_is_made_on_its_contract() {
    let mut sampler = sampler(SamplingConfig::default().seed(5));
    let call = sampler
        .sample_function_call(&transfer(), 0, &StatementPool::new())
        .unwrap();

    match &call {
        Statement::FunctionCall(call) => {
            assert_eq!(call.arguments.len(), 2);
            assert!(matches!(*call.sender, Statement::Address(_)));
            match call.owner.as_ref() {
                Statement::ConstructorCall(owner) => {
                    assert_eq!(owner.contract_id(), TOKEN);
                    assert_eq!(owner.contract_name, "Token");
                    assert_eq!(owner.arguments.len(), 1);
                }
                other => panic!("expected a deployment, got {:?}", other),
            }
        }
        other => panic!("expected a function call, got {:?}", other),
    }
    assert_eq!(call.type_string(), "(bool)");
}

#[test]
fn test_implicit_constructor_takes_no_arguments() {
    let mut sampler = sampler(SamplingConfig::default().seed(6));
    let deployment = sampler
        .sample_constructor_call(REGISTRY, 0, &StatementPool::new())
        .unwrap();
    assert_eq!(deployment.type_string(), "Registry");
    assert_eq!(deployment.child_count(), 1);
}

#[test]
fn test_roots_are_calls_on_deployable_contracts() {
    let mut sampler = sampler(SamplingConfig::default().seed(8));
    for _ in 0..20 {
        let test_case = sampler.sample_test_case().unwrap();
        for root in test_case.roots() {
            match root {
                Statement::ConstructorCall(call) => assert_ne!(call.contract_name, "Base"),
                Statement::FunctionCall(call) => {
                    assert!(!call.function.is_fallback);
                    assert_ne!(call.function.contract_id, "base");
                }
                other => panic!("unexpected root {:?}", other),
            }
        }
    }
}

#[test]
fn test_unsupported_parameter_types_fail_explicitly() {
    let mut sampler = sampler_with(
        catalog_with_unsupported(),
        ConstantPool::new(),
        SamplingConfig::default().seed(1),
    );
    let list = sampler.catalog().function("market.list").cloned().unwrap();
    let err = sampler
        .sample_function_call(&list, 0, &StatementPool::new())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedType);
    assert!(err.message.contains("contract reference"));

    let mapping = TypeDescriptor::Mapping {
        key: Box::new(TypeDescriptor::Address { payable: false }),
        value: Box::new(common::uint256()),
    };
    let err = sampler
        .sample_argument(&mapping, 0, &StatementPool::new())
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedType);
    assert!(err.message.contains("mapping(address => uint256)"));
}
