//! Test file rendering

#[path = "../common/mod.rs"]
mod common;

use common::{account, ping, token_constructor, transfer, uint};
use pretty_assertions::assert_eq;
use serde_json::json;
use solsynth_search::domain::{AddressStatement, AddressValue, ConstructorCall, FunctionCall};
use solsynth_search::{DecodingContext, Statement, TestCase, TestCaseDecoder};

/// Deploy Token(100) from accounts[1], then transfer 5 to address 0x..01
fn token_test_case() -> (TestCase, Statement) {
    let sender = account(1);
    let deployment = Statement::ConstructorCall(ConstructorCall::new(
        "Token",
        token_constructor(),
        vec![uint(100)],
        sender.clone(),
    ));
    let recipient = Statement::Address(AddressStatement::new(
        false,
        AddressValue::from_index(-1),
    ));
    let call = Statement::FunctionCall(FunctionCall::new(
        transfer(),
        vec![recipient, uint(5)],
        sender,
        deployment.clone(),
    ));
    let test_case = TestCase::new(vec![deployment, call.clone()]).unwrap();
    (test_case, call)
}

#[test]
fn test_reused_statements_are_declared_once() {
    let (test_case, _) = token_test_case();
    let rendered = TestCaseDecoder::new("TokenTest").render(&[test_case]);

    let expected = r#"const Token = artifacts.require("Token");

contract("TokenTest", (accounts) => {
  it("test case 0", async () => {
    const uint_0 = "100";
    const address_0 = accounts[1];
    const token_0 = await Token.new(uint_0, { from: address_0 });
    const address_1 = "0x0000000000000000000000000000000000000001";
    const uint_1 = "5";
    const transfer_0 = await token_0.transfer(address_1, uint_1, { from: address_0 });
  });
});
"#;
    assert_eq!(rendered, expected);
}

#[test]
fn test_observed_return_values_become_assertions() {
    let (test_case, call) = token_test_case();
    let mut context = DecodingContext::new();
    context.observe(call.id(), json!(true));

    let decoder = TestCaseDecoder::new("TokenTest");
    let lines: Vec<_> = decoder
        .decode_test_case(&test_case, &mut context)
        .into_iter()
        .map(|d| d.text)
        .collect();
    assert_eq!(lines.last().map(String::as_str), Some("assert.equal(transfer_0, true);"));
    assert_eq!(context.variable_name(&call.id()), Some("transfer_0"));
}

#[test]
fn test_each_test_case_gets_its_own_block() {
    let (token_case, _) = token_test_case();
    let registry = Statement::ConstructorCall(ConstructorCall::new(
        "Registry",
        solsynth_ir::FunctionTarget {
            is_constructor: true,
            ..common::function(common::REGISTRY, "constructor", vec![], vec![])
        },
        vec![],
        account(0),
    ));
    let ping_case = TestCase::new(vec![Statement::FunctionCall(FunctionCall::new(
        ping(),
        vec![],
        account(2),
        registry,
    ))])
    .unwrap();

    let rendered = TestCaseDecoder::new("Suite").render(&[ping_case, token_case]);
    let header: Vec<_> = rendered.lines().take(2).collect();
    assert_eq!(
        header,
        vec![
            r#"const Registry = artifacts.require("Registry");"#,
            r#"const Token = artifacts.require("Token");"#,
        ]
    );
    assert!(rendered.contains(r#"  it("test case 0", async () => {"#));
    assert!(rendered.contains(r#"  it("test case 1", async () => {"#));
    assert!(rendered.contains("    const ping_0 = await registry_0.ping({ from: address_0 });"));
    // Names restart in every block
    assert_eq!(rendered.matches("const address_0 = ").count(), 2);
}

#[test]
fn test_contexts_are_padded_for_extra_test_cases() {
    let (first, _) = token_test_case();
    let (second, _) = token_test_case();
    let rendered = TestCaseDecoder::new("Padded").render_with_contexts(&[first, second], vec![]);
    assert_eq!(rendered.matches("it(\"test case").count(), 2);
}
