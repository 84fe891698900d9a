//! Chromosome invariants under mutation, copy and crossover

#[path = "../common/mod.rs"]
mod common;

use common::{account, ping, sampler, token_constructor, uint, REGISTRY};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use solsynth_ir::config::SamplingConfig;
use solsynth_ir::features::targets::FunctionTarget;
use solsynth_search::domain::{AddressStatement, AddressValue, ConstructorCall, FunctionCall};
use solsynth_search::{
    Crossover, DecodingContext, ErrorKind, Sampler, Statement, TestCase, TreeCrossover,
};

fn texts(test_case: &TestCase) -> Vec<String> {
    let mut context = DecodingContext::new();
    test_case
        .roots()
        .iter()
        .flat_map(|root| root.decode(&mut context))
        .map(|d| d.text)
        .collect()
}

fn config(seed: u64) -> SamplingConfig {
    SamplingConfig::default().seed(seed).max_action_statements(6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mutation_never_empties_a_test_case(seed in any::<u64>(), steps in 1usize..40) {
        let mut sampler = sampler(config(seed));
        let mut test_case = sampler.sample_test_case().unwrap();
        for _ in 0..steps {
            test_case = test_case.mutate(&mut sampler).unwrap();
            prop_assert!(!test_case.is_empty());
            prop_assert!(test_case.len() <= 6);
            prop_assert!(test_case.roots().iter().all(Statement::is_action));
        }
    }

    #[test]
    fn copies_decode_identically(seed in any::<u64>()) {
        let mut sampler = sampler(config(seed));
        let test_case = sampler.sample_test_case().unwrap();
        prop_assert_eq!(texts(&test_case.copy()), texts(&test_case));
        for root in test_case.roots() {
            let copy = root.copy();
            prop_assert_eq!(
                copy.decode(&mut DecodingContext::new()),
                root.decode(&mut DecodingContext::new())
            );
        }
    }

    #[test]
    fn crossover_keeps_root_counts_and_types(seed in any::<u64>()) {
        let mut sampler = sampler(config(seed));
        let first = sampler.sample_test_case().unwrap();
        let second = sampler.sample_test_case().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let (left, right) = TreeCrossover::new()
            .crossover(&[first.clone(), second.clone()], &mut rng)
            .unwrap();
        prop_assert_eq!(left.len(), first.len());
        prop_assert_eq!(right.len(), second.len());

        // Every interior statement is accepted by the slot it occupies
        for offspring in [&left, &right] {
            for position in offspring.positions().into_iter().filter(|p| p.len() > 1) {
                let (last, prefix) = position.split_last().unwrap();
                let mut parent = offspring.statement_at(prefix).unwrap().clone();
                let child = offspring.statement_at(&position).unwrap().clone();
                prop_assert!(parent.set_child(*last, child).is_ok());
            }
        }
    }

    #[test]
    fn seeded_runs_repeat_ids(seed in any::<u64>(), steps in 1usize..10) {
        let run = || {
            let mut sampler = sampler(config(seed));
            let mut test_case = sampler.sample_test_case().unwrap();
            for _ in 0..steps {
                test_case = test_case.mutate(&mut sampler).unwrap();
            }
            let other = sampler.sample_test_case().unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let offspring = TreeCrossover::new()
                .crossover(&[test_case.clone(), other], &mut rng)
                .unwrap();
            (test_case, offspring)
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn mutated_roots_keep_their_type(seed in any::<u64>()) {
        let mut sampler = sampler(config(seed));
        let test_case = sampler.sample_test_case().unwrap();
        let pool = test_case.statement_pool();
        for root in test_case.roots() {
            let mutated = root.mutate(&mut sampler, &pool, 0).unwrap();
            prop_assert_eq!(mutated.type_string(), root.type_string());
            prop_assert_ne!(mutated.id(), root.id());
        }
    }
}

fn payable(index: u32) -> Statement {
    Statement::Address(AddressStatement::new(true, AddressValue::Account(index)))
}

fn registry_constructor() -> FunctionTarget {
    FunctionTarget {
        is_constructor: true,
        implicit: true,
        ..common::function(REGISTRY, "constructor", vec![], vec![])
    }
}

#[test]
fn test_crossover_without_compatible_positions_copies_parents() {
    // Token / uint256 / address payable vs (bool) / address / Registry
    let token = Statement::ConstructorCall(ConstructorCall::new(
        "Token",
        token_constructor(),
        vec![uint(7)],
        payable(1),
    ));
    let registry = Statement::ConstructorCall(ConstructorCall::new(
        "Registry",
        registry_constructor(),
        vec![],
        account(1),
    ));
    let ping = Statement::FunctionCall(FunctionCall::new(ping(), vec![], account(0), registry));

    let first = TestCase::new(vec![token]).unwrap();
    let second = TestCase::new(vec![ping]).unwrap();
    assert!(TreeCrossover::compatible_pairs(&first, &second).is_empty());

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (left, right) = TreeCrossover::new()
        .crossover(&[first.clone(), second.clone()], &mut rng)
        .unwrap();
    assert_eq!(left.roots(), first.roots());
    assert_eq!(right.roots(), second.roots());
}

#[test]
fn test_crossover_swaps_matching_arguments() {
    let deploy = |supply: i64, sender: u32| {
        Statement::ConstructorCall(ConstructorCall::new(
            "Token",
            token_constructor(),
            vec![uint(supply)],
            payable(sender),
        ))
    };
    let first = TestCase::new(vec![deploy(1, 1)]).unwrap();
    let second = TestCase::new(vec![deploy(2, 2)]).unwrap();

    // Roots, arguments and senders pair up with their counterparts
    let pairs = TreeCrossover::compatible_pairs(&first, &second);
    assert_eq!(pairs.len(), 3);

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let (left, right) = TreeCrossover::new()
        .crossover(&[first.clone(), second.clone()], &mut rng)
        .unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 1);
    let swapped = |case: &TestCase| texts(case) != texts(&first) && texts(case) != texts(&second);
    let whole_roots_swapped = texts(&left) == texts(&second) && texts(&right) == texts(&first);
    assert!(whole_roots_swapped || (swapped(&left) && swapped(&right)));
}

/// Two deployable contracts named Token, declared in different files
fn same_named_tokens() -> (FunctionTarget, FunctionTarget, FunctionTarget) {
    let a_constructor = FunctionTarget {
        is_constructor: true,
        implicit: true,
        ..common::function("a.sol/Token", "constructor", vec![], vec![])
    };
    let b_constructor = FunctionTarget {
        is_constructor: true,
        implicit: true,
        ..common::function("b.sol/Token", "constructor", vec![], vec![])
    };
    let poke = common::function("a.sol/Token", "poke", vec![], vec![]);
    (a_constructor, b_constructor, poke)
}

#[test]
fn test_same_named_contracts_are_not_interchangeable() {
    let (a_constructor, b_constructor, poke) = same_named_tokens();
    let a_token = Statement::ConstructorCall(ConstructorCall::new("Token", a_constructor, vec![], account(1)));
    let b_token = Statement::ConstructorCall(ConstructorCall::new("Token", b_constructor, vec![], account(2)));
    let first = TestCase::new(vec![Statement::FunctionCall(FunctionCall::new(
        poke,
        vec![],
        account(0),
        a_token,
    ))])
    .unwrap();
    let second = TestCase::new(vec![b_token]).unwrap();

    // Only the senders pair up: the deployments are of different contracts
    let pairs = TreeCrossover::compatible_pairs(&first, &second);
    assert_eq!(pairs, vec![(vec![0, 0], vec![0, 0]), (vec![0, 1, 0], vec![0, 0])]);

    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (left, right) = TreeCrossover::new()
            .crossover(&[first.clone(), second.clone()], &mut rng)
            .unwrap();
        assert_eq!(left.statement_at(&[0, 1]).unwrap().type_string(), "Token");
        assert_eq!(right.statement_at(&[0]).unwrap().type_string(), "Token");
    }
}

#[test]
fn test_crossover_needs_two_parents() {
    let case = TestCase::new(vec![Statement::ConstructorCall(ConstructorCall::new(
        "Token",
        token_constructor(),
        vec![uint(1)],
        account(0),
    ))])
    .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let crossover = TreeCrossover::new();

    let err = crossover.crossover(&[case.clone()], &mut rng).unwrap_err();
    assert_eq!(err.kind, ErrorKind::CrossoverArity);
    let err = crossover
        .crossover(&[case.clone(), case.clone(), case], &mut rng)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::CrossoverArity);
}

#[test]
fn test_single_root_is_never_deleted() {
    let mut sampler = sampler(SamplingConfig::default().seed(12).max_action_statements(1));
    let mut test_case = sampler.sample_test_case().unwrap();
    assert_eq!(test_case.len(), 1);
    for _ in 0..50 {
        test_case = test_case.mutate(&mut sampler).unwrap();
        assert_eq!(test_case.len(), 1);
    }
}
