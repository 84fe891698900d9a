//! Test file assembly
//!
//! ```text
//! const Token = artifacts.require("Token");
//!
//! contract("Token", (accounts) => {
//!   it("test case 0", async () => {
//!     const address_0 = accounts[1];
//!     const token_0 = await Token.new({ from: address_0 });
//!   });
//! });
//! ```

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::info;

use crate::domain::{Decoding, DecodingContext, TestCase};

#[derive(Debug, Clone)]
pub struct TestCaseDecoder {
    suite_name: String,
}

impl TestCaseDecoder {
    pub fn new(suite_name: impl Into<String>) -> Self {
        Self {
            suite_name: suite_name.into(),
        }
    }

    /// Fragments of all roots in order, sharing one context
    pub fn decode_test_case(&self, test_case: &TestCase, context: &mut DecodingContext) -> Vec<Decoding> {
        test_case
            .roots()
            .iter()
            .flat_map(|root| root.decode(context))
            .collect()
    }

    pub fn render(&self, test_cases: &[TestCase]) -> String {
        let contexts = test_cases.iter().map(|_| DecodingContext::new()).collect();
        self.render_with_contexts(test_cases, contexts)
    }

    /// Render with caller-provided contexts (e.g. holding observed values)
    ///
    /// Test cases without a matching context get an empty one.
    pub fn render_with_contexts(
        &self,
        test_cases: &[TestCase],
        mut contexts: Vec<DecodingContext>,
    ) -> String {
        contexts.resize_with(test_cases.len(), DecodingContext::new);

        let mut deployed = BTreeSet::new();
        let mut blocks = Vec::with_capacity(test_cases.len());
        for (index, (test_case, mut context)) in test_cases.iter().zip(contexts).enumerate() {
            let lines = self.decode_test_case(test_case, &mut context);
            deployed.extend(context.deployed_contracts().map(str::to_string));

            let mut block = format!("  it({}, async () => {{\n", quote(&format!("test case {}", index)));
            for line in lines {
                block.push_str("    ");
                block.push_str(&line.text);
                block.push('\n');
            }
            block.push_str("  });\n");
            blocks.push(block);
        }

        let mut out = String::new();
        for contract in &deployed {
            out.push_str(&format!("const {} = artifacts.require({});\n", contract, quote(contract)));
        }
        if !deployed.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("contract({}, (accounts) => {{\n", quote(&self.suite_name)));
        out.push_str(&blocks.join("\n"));
        out.push_str("});\n");

        info!(
            suite = %self.suite_name,
            test_cases = test_cases.len(),
            contracts = deployed.len(),
            "rendered test file"
        );
        out
    }
}

fn quote(text: &str) -> String {
    Value::from(text).to_string()
}
