//! Objective distances from runner traces

#[path = "../common/mod.rs"]
mod common;

use common::{branch_record, branching_contract, guarded_contract, record, trace};
use solsynth_ir::config::ControlFlowConfig;
use solsynth_ir::features::coverage::{TraceKind, BRANCH_DISTANCE_TIE_BREAK};
use solsynth_ir::features::flow_graph::{
    BuildFlowGraphsUseCase, CfgBuilder, CfgEdgeType, FlowGraphResult,
};
use solsynth_ir::{CoverageObjective, ObjectiveFunction};

fn analyze() -> FlowGraphResult {
    let hub = branching_contract();
    BuildFlowGraphsUseCase::new(CfgBuilder::new(ControlFlowConfig::default()))
        .execute(&hub)
        .unwrap()
}

fn branch<'r>(result: &'r FlowGraphResult, edge_type: CfgEdgeType) -> &'r CoverageObjective {
    result
        .objectives
        .branch_objectives()
        .into_iter()
        .find(|o| o.edge_type == Some(edge_type))
        .unwrap()
}

/// (function header line, condition line, then-statement line) of `C.a`
fn lines(result: &FlowGraphResult) -> (u32, u32, u32) {
    let a = result.program.function_by_name("C.a").unwrap();
    let header = a.graph.node(&a.entry).unwrap().metadata.lines[0];
    let control = a.graph.control_nodes()[0];
    let condition = control.metadata.lines[0];
    let true_side = branch(result, CfgEdgeType::True);
    let statement = a.graph.successors(&true_side.id)[0];
    let statement_line = a.graph.node(statement).unwrap().metadata.lines[0];
    (header, condition, statement_line)
}

#[test]
fn test_empty_trace_covers_nothing() {
    let result = analyze();
    let fitness = ObjectiveFunction::new(&result.program, &result.objectives);
    let empty = trace(vec![]);

    assert!(fitness.covered(&empty).unwrap().is_empty());
    let a = result.program.function_by_name("C.a").unwrap();
    let function = result.objectives.get(&a.id).unwrap();
    assert_eq!(fitness.distance(function, &empty).unwrap(), 1.0);

    // No executed node reaches the condition: one control node plus tie-break
    let d = fitness.distance(branch(&result, CfgEdgeType::True), &empty).unwrap();
    assert!((d - (1.0 + BRANCH_DISTANCE_TIE_BREAK)).abs() < 1e-9);
}

#[test]
fn test_false_side_taken() {
    let result = analyze();
    let (header, condition, _) = lines(&result);
    let fitness = ObjectiveFunction::new(&result.program, &result.objectives);
    let run = trace(vec![
        record(TraceKind::Function, header, 1),
        branch_record(condition, ">", 4.0, 10.0, false),
    ]);

    let a = result.program.function_by_name("C.a").unwrap();
    let function = result.objectives.get(&a.id).unwrap();
    assert_eq!(fitness.distance(function, &run).unwrap(), 0.0);
    assert_eq!(fitness.distance(branch(&result, CfgEdgeType::False), &run).unwrap(), 0.0);

    // 4 > 10 is 7 away from true: 7 / 8 at approach level 0
    let d = fitness.distance(branch(&result, CfgEdgeType::True), &run).unwrap();
    assert!((d - 0.875).abs() < 1e-9);

    let b = result.program.function_by_name("C.b").unwrap();
    let b_objective = result.objectives.get(&b.id).unwrap();
    assert_eq!(fitness.distance(b_objective, &run).unwrap(), 1.0);
}

#[test]
fn test_statement_hit_covers_true_side() {
    let result = analyze();
    let (header, _, statement) = lines(&result);
    let fitness = ObjectiveFunction::new(&result.program, &result.objectives);
    let run = trace(vec![
        record(TraceKind::Function, header, 1),
        record(TraceKind::Statement, statement, 3),
    ]);

    let covered: Vec<_> = fitness
        .covered(&run)
        .unwrap()
        .iter()
        .map(|o| o.edge_type)
        .collect();
    assert_eq!(covered, vec![Some(CfgEdgeType::True), None]);
}

#[test]
fn test_zero_hit_records_do_not_count() {
    let result = analyze();
    let (header, _, statement) = lines(&result);
    let fitness = ObjectiveFunction::new(&result.program, &result.objectives);
    let run = trace(vec![
        record(TraceKind::Function, header, 0),
        record(TraceKind::Statement, statement, 0),
    ]);
    assert!(fitness.covered(&run).unwrap().is_empty());
}

#[test]
fn test_distances_follow_model_order() {
    let result = analyze();
    let fitness = ObjectiveFunction::new(&result.program, &result.objectives);
    let distances = fitness.distances(&trace(vec![])).unwrap();
    let ids: Vec<_> = result.objectives.objectives().iter().map(|o| o.id.clone()).collect();
    let got: Vec<_> = distances.into_iter().map(|(id, _)| id).collect();
    assert_eq!(got, ids);
}

#[test]
fn test_guard_records_cover_pass_and_revert() {
    let result = BuildFlowGraphsUseCase::new(CfgBuilder::new(ControlFlowConfig::default()))
        .execute(&guarded_contract())
        .unwrap();
    let fitness = ObjectiveFunction::new(&result.program, &result.objectives);
    let g = result.program.function_by_name("C.g").unwrap();
    let guard_line = g.graph.control_nodes()[0].metadata.lines[0];
    let pass = branch(&result, CfgEdgeType::True);
    let revert = branch(&result, CfgEdgeType::False);

    let reverted = trace(vec![record(TraceKind::RequirePre, guard_line, 1)]);
    assert!(!fitness.is_covered(pass, &reverted).unwrap());
    assert!(fitness.is_covered(revert, &reverted).unwrap());
    assert_eq!(fitness.distance(revert, &reverted).unwrap(), 0.0);

    let passed = trace(vec![
        record(TraceKind::RequirePre, guard_line, 1),
        record(TraceKind::RequirePost, guard_line, 1),
    ]);
    assert!(fitness.is_covered(pass, &passed).unwrap());
    assert!(!fitness.is_covered(revert, &passed).unwrap());
    // The guard ran, so only the branch distance is left
    assert!(fitness.distance(revert, &passed).unwrap() < 1.0);
}
