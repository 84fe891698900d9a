//! Objective extraction over built flow graphs

#[path = "../common/mod.rs"]
mod common;

use common::{branching_contract, token_project};
use pretty_assertions::assert_eq;
use solsynth_ir::config::ControlFlowConfig;
use solsynth_ir::features::flow_graph::{BuildFlowGraphsUseCase, CfgBuilder, CfgEdgeType};
use solsynth_ir::ObjectiveKind;

fn use_case() -> BuildFlowGraphsUseCase<CfgBuilder> {
    BuildFlowGraphsUseCase::new(CfgBuilder::new(ControlFlowConfig::default()))
}

#[test]
fn test_function_with_one_if_has_two_children() {
    let hub = branching_contract();
    let result = use_case().execute(&hub).unwrap();

    let a = result.program.function_by_name("C.a").unwrap();
    let b = result.program.function_by_name("C.b").unwrap();

    let a_objective = result.objectives.get(&a.id).unwrap();
    assert_eq!(a_objective.kind, ObjectiveKind::Function);
    assert_eq!(a_objective.children.len(), 2);

    let edge_types: Vec<_> = result
        .objectives
        .children(&a.id)
        .iter()
        .map(|child| child.edge_type)
        .collect();
    assert_eq!(edge_types, vec![Some(CfgEdgeType::True), Some(CfgEdgeType::False)]);

    let b_objective = result.objectives.get(&b.id).unwrap();
    assert!(b_objective.children.is_empty());
}

#[test]
fn test_roots_are_function_objectives() {
    let hub = branching_contract();
    let result = use_case().execute(&hub).unwrap();

    assert_eq!(result.objectives.len(), 4);
    assert_eq!(result.objectives.branch_objectives().len(), 2);
    let roots: Vec<_> = result.objectives.roots().iter().map(|o| o.kind).collect();
    assert_eq!(roots, vec![ObjectiveKind::Function, ObjectiveKind::Function]);
    assert!(result.objectives.check_acyclic().is_ok());
}

#[test]
fn test_branch_objectives_point_at_the_control_node() {
    let hub = branching_contract();
    let result = use_case().execute(&hub).unwrap();
    let a = result.program.function_by_name("C.a").unwrap();
    let control = a.graph.control_nodes()[0].id.clone();

    for objective in result.objectives.branch_objectives() {
        assert_eq!(objective.control_node.as_deref(), Some(control.as_str()));
        assert_eq!(objective.function_id, a.id);
        assert!(objective.children.is_empty());
    }
}

#[test]
fn test_empty_body_gives_childless_function_objective() {
    let base = token_project().remove(0);
    let result = use_case().execute(&base).unwrap();
    assert_eq!(result.objectives.len(), 1);
    assert!(result.objectives.objectives()[0].children.is_empty());
}
