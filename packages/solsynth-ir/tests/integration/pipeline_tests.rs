//! Project analysis: per-file results merged into project views

#[path = "../common/mod.rs"]
mod common;

use common::{branching_contract, to_json, token_project};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;
use solsynth_ir::{ErrorKind, Preset, ProjectAnalyzer, SolsynthConfig, SourceFile};

fn analyzer(parallel: bool) -> ProjectAnalyzer {
    let config = SolsynthConfig::preset(Preset::Balanced)
        .parallel(|c| c.enabled(parallel).num_threads(if parallel { 2 } else { 0 }))
        .build()
        .unwrap();
    ProjectAnalyzer::new(config)
}

#[test]
fn test_project_views_are_merged() {
    let analysis = analyzer(true).analyze(&token_project()).unwrap();

    assert!(analysis.is_complete());
    let paths: Vec<_> = analysis.files.iter().map(|f| f.file_path.as_str()).collect();
    assert_eq!(paths, vec!["contracts/Base.sol", "contracts/Token.sol"]);

    // Dependencies first
    assert_eq!(
        analysis.dependencies.topological_order(),
        &["contracts/Base.sol".to_string(), "contracts/Token.sol".to_string()]
    );
    assert_eq!(
        analysis.dependencies.dependencies("contracts/Token.sol"),
        vec!["contracts/Base.sol".to_string()]
    );
    assert!(!analysis.dependencies.has_cycles());

    let token = analysis.catalog.contract_by_name("Token").unwrap();
    assert_eq!(token.bases, vec!["Base".to_string()]);
    assert_eq!(analysis.catalog.len(), 4);
    assert!(analysis.catalog.constructor_of(&token.id).is_some());

    assert_eq!(analysis.constants.integer_count(&BigInt::from(100)), 2);
    assert_eq!(analysis.constants.string_count("too much"), 1);
}

#[test]
fn test_sequential_and_parallel_agree() {
    let parallel = analyzer(true).analyze(&token_project()).unwrap();
    let sequential = analyzer(false).analyze(&token_project()).unwrap();

    assert_eq!(parallel.objective_count(), sequential.objective_count());
    assert_eq!(parallel.constants, sequential.constants);
    assert_eq!(
        parallel.dependencies.topological_order(),
        sequential.dependencies.topological_order()
    );
}

#[test]
fn test_failed_file_is_reported_and_skipped() {
    let good = branching_contract();
    let sources = vec![
        SourceFile::new("contracts/C.sol", good.source(), to_json(&good)),
        SourceFile::new("contracts/Broken.sol", "", "{ not json"),
    ];
    let analysis = analyzer(true).analyze_sources(sources).unwrap();

    assert_eq!(analysis.files.len(), 1);
    assert_eq!(analysis.failures.len(), 1);
    assert_eq!(analysis.failures[0].file_path, "contracts/Broken.sol");
    assert_eq!(analysis.failures[0].error.kind, ErrorKind::Ast);
    assert!(!analysis.is_complete());
    assert_eq!(analysis.objective_count(), 4);
}

#[test]
fn test_constant_extraction_can_be_disabled() {
    let config = SolsynthConfig::preset(Preset::Fast)
        .constant_pool(|c| c.enabled(false))
        .build()
        .unwrap();
    let analysis = ProjectAnalyzer::new(config)
        .analyze(&token_project())
        .unwrap();
    assert!(analysis.constants.is_empty());
    assert_eq!(analysis.catalog.len(), 4);
}
