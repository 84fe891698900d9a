//! Shared contracts
//!
//! `branching_contract`:
//!
//! ```solidity
//! contract C {
//!     function a(uint256 x) public { if (x > 10) { y = 1; } }
//!     function b() public { y = 2; }
//! }
//! ```
//!
//! `guarded_contract`, under the same path:
//!
//! ```solidity
//! contract C {
//!     function g(uint256 x) public { require(x > 10, "small"); y = 1; }
//! }
//! ```
//!
//! `token_project`: `contracts/Base.sol` and `contracts/Token.sol`, the
//! latter importing the former and extending `Base`.

use serde_json::Value;
use solsynth_ir::features::coverage::{ExecutionTrace, TraceKind, TraceLocation, TraceRecord};
use solsynth_ir::shared::models::Position;
use solsynth_ir::AstHub;

use super::ast_builder::AstBuilder;

pub const BRANCHING_PATH: &str = "contracts/C.sol";

pub fn branching_contract() -> AstHub {
    let mut b = AstBuilder::new();

    let uint = b.elementary("uint256");
    let x_param = b.parameter(uint, "x");
    let x = b.identifier("x");
    let ten = b.number("10");
    let condition = b.binary(">", x, ten);
    let one = b.number("1");
    let then = b.assign("y", one);
    let then_block = b.block(vec![then]);
    let branch = b.if_statement(condition, then_block, None);
    let a_body = b.block(vec![branch]);
    let a = b.function("a", vec![x_param], Some(a_body), "public");

    let two = b.number("2");
    let straight = b.assign("y", two);
    let b_body = b.block(vec![straight]);
    let b_fn = b.function("b", vec![], Some(b_body), "public");

    let contract = b.contract("C", "contract", &[], vec![a, b_fn]);
    let unit = b.source_unit(vec![contract]);
    let (source, ast) = b.finish(unit);
    AstHub::new(BRANCHING_PATH, source, ast)
}

pub fn guarded_contract() -> AstHub {
    let mut b = AstBuilder::new();

    let uint = b.elementary("uint256");
    let x_param = b.parameter(uint, "x");
    let x = b.identifier("x");
    let ten = b.number("10");
    let condition = b.binary(">", x, ten);
    let reason = b.string("small");
    let guard = b.call_statement("require", vec![condition, reason]);
    let one = b.number("1");
    let after = b.assign("y", one);
    let body = b.block(vec![guard, after]);
    let g = b.function("g", vec![x_param], Some(body), "public");

    let contract = b.contract("C", "contract", &[], vec![g]);
    let unit = b.source_unit(vec![contract]);
    let (source, ast) = b.finish(unit);
    AstHub::new(BRANCHING_PATH, source, ast)
}

pub fn token_project() -> Vec<AstHub> {
    vec![base_file(), token_file()]
}

fn base_file() -> AstHub {
    let mut b = AstBuilder::new();
    let pragma = b.pragma("^0.8.0");
    let body = b.block(vec![]);
    let ping = b.function("ping", vec![], Some(body), "public");
    let contract = b.contract("Base", "contract", &[], vec![ping]);
    let unit = b.source_unit(vec![pragma, contract]);
    let (source, ast) = b.finish(unit);
    AstHub::new("contracts/Base.sol", source, ast)
}

fn token_file() -> AstHub {
    let mut b = AstBuilder::new();
    let pragma = b.pragma("^0.8.0");
    let import = b.import("./Base.sol", None, &[]);

    let uint = b.elementary("uint256");
    let hundred = b.number("100");
    let limit = b.state_variable(uint, "limit", Some(hundred));

    let address = b.elementary("address");
    let to = b.parameter(address, "to");
    let uint = b.elementary("uint256");
    let amount = b.parameter(uint, "amount");

    let amount_ref = b.identifier("amount");
    let hundred = b.number("100");
    let condition = b.binary(">", amount_ref, hundred);
    let reason = b.string("too much");
    let rejected = b.call_statement("revert", vec![reason]);
    let then_block = b.block(vec![rejected]);
    let branch = b.if_statement(condition, then_block, None);
    let body = b.block(vec![branch]);
    let transfer = b.function("transfer", vec![to, amount], Some(body), "public");

    let contract = b.contract("Token", "contract", &["Base"], vec![limit, transfer]);
    let unit = b.source_unit(vec![pragma, import, contract]);
    let (source, ast) = b.finish(unit);
    AstHub::new("contracts/Token.sol", source, ast)
}

/// Parser JSON for a hub, as the runner side would hand it over
pub fn to_json(hub: &AstHub) -> String {
    hub.raw().to_string()
}

pub fn record(kind: TraceKind, line: u32, hits: u64) -> TraceRecord {
    TraceRecord {
        id: format!("{:?}-{}", kind, line),
        kind,
        path: format!("/work/{}", BRANCHING_PATH),
        location: TraceLocation {
            start: Position { line, column: 0 },
            end: Position { line, column: 1 },
        },
        hits,
        condition: None,
        variables: None,
        outcome: None,
    }
}

/// Branch record with its operands
pub fn branch_record(line: u32, operator: &str, left: f64, right: f64, outcome: bool) -> TraceRecord {
    let mut record = record(TraceKind::Branch, line, 1);
    record.condition = Some(operator.to_string());
    record.variables = Some(
        [
            ("left".to_string(), Value::from(left)),
            ("right".to_string(), Value::from(right)),
        ]
        .into_iter()
        .collect(),
    );
    record.outcome = Some(outcome);
    record
}

pub fn trace(records: Vec<TraceRecord>) -> ExecutionTrace {
    ExecutionTrace::new(records)
}
