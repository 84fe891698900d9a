//! Rendering statements as Truffle / mocha JavaScript
//!
//! Children are rendered before their parent. Each statement id is declared
//! once per context as `const <base>_<n> = ...;`; later occurrences of the
//! same id reference that variable.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde_json::Value;

use super::statement::{AddressValue, Statement, StatementId};

/// One rendered line and the statement it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoding {
    pub text: String,
    pub statement_id: StatementId,
}

/// Variable names and observed values for one test body
#[derive(Debug, Clone, Default)]
pub struct DecodingContext {
    names: FxHashMap<StatementId, String>,
    counters: FxHashMap<String, usize>,
    observed: FxHashMap<StatementId, Value>,
    deployed: BTreeSet<String>,
}

impl DecodingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call's return value; the call decodes with an assertion
    pub fn observe(&mut self, statement_id: StatementId, value: Value) {
        self.observed.insert(statement_id, value);
    }

    pub fn variable_name(&self, statement_id: &StatementId) -> Option<&str> {
        self.names.get(statement_id).map(String::as_str)
    }

    /// Contracts deployed by decoded statements, sorted
    pub fn deployed_contracts(&self) -> impl Iterator<Item = &str> {
        self.deployed.iter().map(String::as_str)
    }

    fn declare(&mut self, statement_id: StatementId, base: &str) -> String {
        let counter = self.counters.entry(base.to_string()).or_insert(0);
        let name = format!("{}_{}", base, counter);
        *counter += 1;
        self.names.insert(statement_id, name.clone());
        name
    }
}

impl Statement {
    /// Declarations needed to evaluate this statement, in order
    pub fn decode(&self, context: &mut DecodingContext) -> Vec<Decoding> {
        let mut out = Vec::new();
        self.decode_into(context, &mut out);
        out
    }

    fn decode_into(&self, context: &mut DecodingContext, out: &mut Vec<Decoding>) -> String {
        let id = self.id();
        if let Some(name) = context.variable_name(&id) {
            return name.to_string();
        }

        let children: Vec<String> = self
            .children()
            .into_iter()
            .map(|child| child.decode_into(context, out))
            .collect();

        let expression = match self {
            Statement::Bool(s) => s.value.to_string(),
            Statement::Integer(s) => quote(&s.value.to_string()),
            Statement::Numeric(s) => quote(&s.text()),
            Statement::String(s) => quote(&s.value),
            Statement::Bytes(s) => quote(&s.hex()),
            Statement::Address(s) => match &s.value {
                AddressValue::Account(index) => format!("accounts[{}]", index),
                AddressValue::Literal(literal) => quote(literal),
            },
            Statement::ConstructorCall(call) => {
                context.deployed.insert(call.contract_name.clone());
                let (arguments, sender) = split_sender(&children, call.arguments.len());
                format!(
                    "await {}.new({})",
                    call.contract_name,
                    call_arguments(arguments, sender)
                )
            }
            Statement::FunctionCall(call) => {
                let arguments = &children[..call.arguments.len()];
                let sender = children.get(call.arguments.len()).map(String::as_str);
                let owner = children
                    .get(call.arguments.len() + 1)
                    .map(String::as_str)
                    .unwrap_or("undefined");
                format!(
                    "await {}.{}({})",
                    owner,
                    call.function.name,
                    call_arguments(arguments, sender)
                )
            }
            Statement::Mapping(_) => {
                let pairs: Vec<String> = children
                    .chunks(2)
                    .map(|pair| format!("[{}]", pair.join(", ")))
                    .collect();
                format!("new Map([{}])", pairs.join(", "))
            }
            Statement::Array(_) => format!("[{}]", children.join(", ")),
        };

        let name = context.declare(id, &self.variable_base());
        out.push(Decoding {
            text: format!("const {} = {};", name, expression),
            statement_id: id,
        });
        if let Some(value) = context.observed.get(&id) {
            out.push(Decoding {
                text: format!("assert.equal({}, {});", name, value),
                statement_id: id,
            });
        }
        name
    }

    fn variable_base(&self) -> String {
        match self {
            Statement::Bool(_) => "bool".to_string(),
            Statement::Integer(s) => if s.signed { "int" } else { "uint" }.to_string(),
            Statement::Numeric(s) => if s.signed { "fixed" } else { "ufixed" }.to_string(),
            Statement::String(_) => "string".to_string(),
            Statement::Bytes(_) => "bytes".to_string(),
            Statement::Address(_) => "address".to_string(),
            Statement::ConstructorCall(call) => lower_first(&call.contract_name),
            Statement::FunctionCall(call) => call.function.name.clone(),
            Statement::Mapping(_) => "mapping".to_string(),
            Statement::Array(_) => "array".to_string(),
        }
    }
}

fn split_sender(children: &[String], arguments: usize) -> (&[String], Option<&str>) {
    let (arguments, rest) = children.split_at(arguments.min(children.len()));
    (arguments, rest.first().map(String::as_str))
}

fn call_arguments(arguments: &[String], sender: Option<&str>) -> String {
    let mut parts: Vec<String> = arguments.to_vec();
    if let Some(sender) = sender {
        parts.push(format!("{{ from: {} }}", sender));
    }
    parts.join(", ")
}

fn quote(text: &str) -> String {
    Value::from(text).to_string()
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "contract".to_string(),
    }
}
