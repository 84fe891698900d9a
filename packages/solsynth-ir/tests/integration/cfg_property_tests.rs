//! Graph and objective invariants over randomly nested statements

#[path = "../common/mod.rs"]
mod common;

use common::AstBuilder;
use proptest::prelude::*;
use serde_json::Value;
use solsynth_ir::config::ControlFlowConfig;
use solsynth_ir::features::flow_graph::{BuildFlowGraphsUseCase, CfgBuilder, CfgEdgeType};
use solsynth_ir::AstHub;

/// Statement skeleton; rendered into parser JSON by `render`
#[derive(Debug, Clone)]
enum Shape {
    Assign,
    Require,
    Revert,
    Return,
    Break,
    Continue,
    If(Vec<Shape>, Option<Vec<Shape>>),
    While(Vec<Shape>),
    DoWhile(Vec<Shape>),
    For(bool, Vec<Shape>),
    Try(Vec<Shape>, Vec<Vec<Shape>>),
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        4 => Just(Shape::Assign),
        2 => Just(Shape::Require),
        1 => Just(Shape::Revert),
        1 => Just(Shape::Return),
        1 => Just(Shape::Break),
        1 => Just(Shape::Continue),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        let body = prop::collection::vec(inner, 0..4);
        prop_oneof![
            (body.clone(), prop::option::of(body.clone())).prop_map(|(then, otherwise)| Shape::If(then, otherwise)),
            body.clone().prop_map(Shape::While),
            body.clone().prop_map(Shape::DoWhile),
            (any::<bool>(), body.clone()).prop_map(|(checked, body)| Shape::For(checked, body)),
            (body.clone(), prop::collection::vec(body, 0..3)).prop_map(|(body, catches)| Shape::Try(body, catches)),
        ]
    })
}

fn condition(b: &mut AstBuilder) -> Value {
    let x = b.identifier("x");
    let zero = b.number("0");
    b.binary(">", x, zero)
}

fn block(b: &mut AstBuilder, shapes: &[Shape], in_loop: bool) -> Value {
    let statements = shapes.iter().map(|shape| render(b, shape, in_loop)).collect();
    b.block(statements)
}

/// Jumps outside a loop become plain assignments
fn render(b: &mut AstBuilder, shape: &Shape, in_loop: bool) -> Value {
    match shape {
        Shape::Require => {
            let guard = condition(b);
            b.call_statement("require", vec![guard])
        }
        Shape::Revert => b.call_statement("revert", vec![]),
        Shape::Return => b.return_statement(None),
        Shape::Break if in_loop => b.break_statement(),
        Shape::Continue if in_loop => b.continue_statement(),
        Shape::Assign | Shape::Break | Shape::Continue => {
            let one = b.number("1");
            b.assign("y", one)
        }
        Shape::If(then, otherwise) => {
            let guard = condition(b);
            let then = block(b, then, in_loop);
            let otherwise = otherwise.as_ref().map(|otherwise| block(b, otherwise, in_loop));
            b.if_statement(guard, then, otherwise)
        }
        Shape::While(body) => {
            let guard = condition(b);
            let body = block(b, body, true);
            b.while_statement(guard, body)
        }
        Shape::DoWhile(body) => {
            let body = block(b, body, true);
            let guard = condition(b);
            b.do_while(body, guard)
        }
        Shape::For(checked, body) => {
            let uint = b.elementary("uint256");
            let zero = b.number("0");
            let init = b.variable_declaration_statement(uint, "i", Some(zero));
            let guard = if *checked { Some(condition(b)) } else { None };
            let i = b.identifier("i");
            let update = b.unary("++", i, false);
            let body = block(b, body, true);
            b.for_statement(Some(init), guard, Some(update), body)
        }
        Shape::Try(body, catches) => {
            let token = b.identifier("token");
            let callee = b.member(token, "transfer");
            let call = b.call_expression(callee, vec![]);
            let body = block(b, body, in_loop);
            let catches = catches.iter().map(|catch| block(b, catch, in_loop)).collect();
            b.try_statement(call, body, catches)
        }
    }
}

fn function_hub(shapes: &[Shape]) -> AstHub {
    let mut b = AstBuilder::new();
    let body = block(&mut b, shapes, false);
    let function = b.function("f", vec![], Some(body), "public");
    let contract = b.contract("C", "contract", &[], vec![function]);
    let unit = b.source_unit(vec![contract]);
    let (source, ast) = b.finish(unit);
    AstHub::new("contracts/C.sol", source, ast)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn nested_statements_give_well_formed_graphs(shapes in prop::collection::vec(shape(), 0..5)) {
        let hub = function_hub(&shapes);
        let result = BuildFlowGraphsUseCase::new(CfgBuilder::new(ControlFlowConfig::default()))
            .execute(&hub)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(result.program.functions.len(), 1);
        let f = &result.program.functions[0];
        prop_assert!(f.validate().is_ok());
        prop_assert!(f.graph.incoming(&f.entry).is_empty());
        prop_assert!(f.graph.outgoing(&f.success_exit).is_empty());
        prop_assert!(f.graph.outgoing(&f.error_exit).is_empty());

        // Everything but the exits flows somewhere
        for node in f.graph.nodes() {
            if node.id != f.success_exit && node.id != f.error_exit {
                prop_assert!(f.graph.out_degree(&node.id) > 0, "{} is a dead end", node.id);
            }
        }
        for edge in f.graph.incoming(&f.error_exit) {
            prop_assert_eq!(edge.edge_type, CfgEdgeType::Exception);
        }

        prop_assert!(result.objectives.check_acyclic().is_ok());
        prop_assert!(result.objectives.get(&f.id).is_some());
        for control in f.graph.control_nodes() {
            for target in f.graph.successors(&control.id) {
                prop_assert!(result.objectives.contains(target));
            }
        }
    }
}
