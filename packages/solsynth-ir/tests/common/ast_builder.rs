//! Parser-shaped JSON AST builder
//!
//! Produces nodes in the shape of `@solidity-parser/parser` output with
//! `loc` and `range` filled in. Every node gets its own line in the generated
//! source, so locations (and therefore graph ids) are unique and `source()`
//! slices are valid.

#![allow(dead_code)]

use serde_json::{json, Map, Value};

#[derive(Debug, Default)]
pub struct AstBuilder {
    source: String,
    line: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self {
            source: String::new(),
            line: 1,
        }
    }

    /// Finish building; returns the generated source and the root node
    pub fn finish(self, root: Value) -> (String, Value) {
        (self.source, root)
    }

    /// Source text previously assigned to a node
    pub fn text(&self, node: &Value) -> String {
        let range = node.get("range").and_then(Value::as_array);
        match range {
            Some(range) => {
                let start = range[0].as_u64().unwrap_or(0) as usize;
                let end = range[1].as_u64().unwrap_or(0) as usize;
                self.source.get(start..=end).unwrap_or("").to_string()
            }
            None => String::new(),
        }
    }

    /// Raw node constructor: `type`, then fields in order, then `loc`/`range`
    pub fn node(&mut self, node_type: &str, text: &str, fields: Value) -> Value {
        let text = if text.trim().is_empty() {
            node_type.to_string()
        } else {
            text.replace('\n', " ")
        };

        let start = self.source.len();
        let end = start + text.len() - 1;
        let line = self.line;
        self.source.push_str(&text);
        self.source.push('\n');
        self.line += 1;

        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(node_type.to_string()));
        if let Value::Object(fields) = fields {
            for (key, value) in fields {
                map.insert(key, value);
            }
        }
        map.insert(
            "loc".to_string(),
            json!({
                "start": {"line": line, "column": 0},
                "end": {"line": line, "column": text.len()}
            }),
        );
        map.insert("range".to_string(), json!([start, end]));
        Value::Object(map)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Source units and definitions
    // ═══════════════════════════════════════════════════════════════════════

    pub fn source_unit(&mut self, children: Vec<Value>) -> Value {
        self.node("SourceUnit", "SourceUnit", json!({ "children": children }))
    }

    pub fn pragma(&mut self, value: &str) -> Value {
        self.node(
            "PragmaDirective",
            &format!("pragma solidity {};", value),
            json!({ "name": "solidity", "value": value }),
        )
    }

    pub fn import(&mut self, path: &str, unit_alias: Option<&str>, symbols: &[(&str, Option<&str>)]) -> Value {
        let symbol_aliases: Value = if symbols.is_empty() {
            Value::Null
        } else {
            Value::Array(
                symbols
                    .iter()
                    .map(|(name, alias)| json!([name, alias]))
                    .collect(),
            )
        };
        self.node(
            "ImportDirective",
            &format!("import \"{}\";", path),
            json!({
                "path": path,
                "unitAlias": unit_alias,
                "symbolAliases": symbol_aliases
            }),
        )
    }

    pub fn contract(&mut self, name: &str, kind: &str, bases: &[&str], sub_nodes: Vec<Value>) -> Value {
        let base_contracts: Vec<Value> = bases
            .iter()
            .map(|base| {
                let base_name = self.user_type(base);
                self.node(
                    "InheritanceSpecifier",
                    base,
                    json!({ "baseName": base_name, "arguments": [] }),
                )
            })
            .collect();
        self.node(
            "ContractDefinition",
            &format!("{} {}", kind, name),
            json!({
                "name": name,
                "baseContracts": base_contracts,
                "subNodes": sub_nodes,
                "kind": kind
            }),
        )
    }

    /// `function name(params) visibility mutability { body }`
    pub fn function(
        &mut self,
        name: &str,
        parameters: Vec<Value>,
        body: Option<Value>,
        visibility: &str,
    ) -> Value {
        self.function_full(name, parameters, vec![], body, visibility, None, FunctionKind::Regular)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn function_full(
        &mut self,
        name: &str,
        parameters: Vec<Value>,
        return_parameters: Vec<Value>,
        body: Option<Value>,
        visibility: &str,
        mutability: Option<&str>,
        kind: FunctionKind,
    ) -> Value {
        let returns = if return_parameters.is_empty() {
            Value::Null
        } else {
            Value::Array(return_parameters)
        };
        let name_value = match kind {
            FunctionKind::Regular => Value::String(name.to_string()),
            _ => Value::Null,
        };
        let text = match kind {
            FunctionKind::Regular => format!("function {}()", name),
            FunctionKind::Constructor => "constructor()".to_string(),
            FunctionKind::Fallback => "fallback()".to_string(),
            FunctionKind::Receive => "receive()".to_string(),
        };
        self.node(
            "FunctionDefinition",
            &text,
            json!({
                "name": name_value,
                "parameters": parameters,
                "returnParameters": returns,
                "body": body,
                "visibility": visibility,
                "modifiers": [],
                "override": null,
                "isConstructor": kind == FunctionKind::Constructor,
                "isReceiveEther": kind == FunctionKind::Receive,
                "isFallback": kind == FunctionKind::Fallback,
                "isVirtual": false,
                "stateMutability": mutability
            }),
        )
    }

    pub fn modifier(&mut self, name: &str, body: Option<Value>) -> Value {
        self.node(
            "ModifierDefinition",
            &format!("modifier {}", name),
            json!({
                "name": name,
                "parameters": [],
                "body": body,
                "isVirtual": false,
                "override": null
            }),
        )
    }

    pub fn parameter(&mut self, type_name: Value, name: &str) -> Value {
        let text = format!("{} {}", self.text(&type_name), name);
        self.node(
            "VariableDeclaration",
            &text,
            json!({
                "typeName": type_name,
                "name": name,
                "storageLocation": null,
                "isStateVar": false,
                "isIndexed": false,
                "expression": null
            }),
        )
    }

    pub fn state_variable(&mut self, type_name: Value, name: &str, initial: Option<Value>) -> Value {
        let text = format!("{} {}", self.text(&type_name), name);
        let variable = self.node(
            "VariableDeclaration",
            &text,
            json!({
                "typeName": type_name,
                "name": name,
                "expression": initial.clone(),
                "visibility": "internal",
                "isStateVar": true,
                "isDeclaredConst": false,
                "isIndexed": false,
                "isImmutable": false
            }),
        );
        self.node(
            "StateVariableDeclaration",
            &format!("{};", text),
            json!({ "variables": [variable], "initialValue": initial }),
        )
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Type names
    // ═══════════════════════════════════════════════════════════════════════

    pub fn elementary(&mut self, name: &str) -> Value {
        self.node(
            "ElementaryTypeName",
            name,
            json!({ "name": name, "stateMutability": null }),
        )
    }

    pub fn address_payable(&mut self) -> Value {
        self.node(
            "ElementaryTypeName",
            "address payable",
            json!({ "name": "address", "stateMutability": "payable" }),
        )
    }

    pub fn user_type(&mut self, name: &str) -> Value {
        self.node("UserDefinedTypeName", name, json!({ "namePath": name }))
    }

    pub fn mapping(&mut self, key: Value, value: Value) -> Value {
        let text = format!("mapping({} => {})", self.text(&key), self.text(&value));
        self.node("Mapping", &text, json!({ "keyType": key, "valueType": value }))
    }

    pub fn array_type(&mut self, base: Value, length: Option<Value>) -> Value {
        let text = format!("{}[]", self.text(&base));
        self.node(
            "ArrayTypeName",
            &text,
            json!({ "baseTypeName": base, "length": length }),
        )
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    pub fn block(&mut self, statements: Vec<Value>) -> Value {
        self.node("Block", "{}", json!({ "statements": statements }))
    }

    pub fn unchecked(&mut self, block: Value) -> Value {
        self.node("UncheckedStatement", "unchecked {}", json!({ "block": block }))
    }

    pub fn expression_statement(&mut self, expression: Value) -> Value {
        let text = format!("{};", self.text(&expression));
        self.node("ExpressionStatement", &text, json!({ "expression": expression }))
    }

    /// `name(args);` as an expression statement
    pub fn call_statement(&mut self, name: &str, arguments: Vec<Value>) -> Value {
        let call = self.call(name, arguments);
        self.expression_statement(call)
    }

    pub fn variable_declaration_statement(&mut self, type_name: Value, name: &str, initial: Option<Value>) -> Value {
        let text = format!("{} {}", self.text(&type_name), name);
        let variable = self.node(
            "VariableDeclaration",
            &text,
            json!({
                "typeName": type_name,
                "name": name,
                "storageLocation": null,
                "isStateVar": false,
                "isIndexed": false,
                "expression": null
            }),
        );
        self.node(
            "VariableDeclarationStatement",
            &format!("{};", text),
            json!({ "variables": [variable], "initialValue": initial }),
        )
    }

    pub fn if_statement(&mut self, condition: Value, true_body: Value, false_body: Option<Value>) -> Value {
        let text = format!("if ({})", self.text(&condition));
        self.node(
            "IfStatement",
            &text,
            json!({
                "condition": condition,
                "trueBody": true_body,
                "falseBody": false_body
            }),
        )
    }

    pub fn while_statement(&mut self, condition: Value, body: Value) -> Value {
        let text = format!("while ({})", self.text(&condition));
        self.node(
            "WhileStatement",
            &text,
            json!({ "condition": condition, "body": body }),
        )
    }

    pub fn do_while(&mut self, body: Value, condition: Value) -> Value {
        let text = format!("do while ({})", self.text(&condition));
        self.node(
            "DoWhileStatement",
            &text,
            json!({ "body": body, "condition": condition }),
        )
    }

    pub fn for_statement(
        &mut self,
        init: Option<Value>,
        condition: Option<Value>,
        update: Option<Value>,
        body: Value,
    ) -> Value {
        let update = update.map(|expression| {
            let text = self.text(&expression);
            self.node("ExpressionStatement", &text, json!({ "expression": expression }))
        });
        self.node(
            "ForStatement",
            "for (;;)",
            json!({
                "initExpression": init,
                "conditionExpression": condition,
                "loopExpression": update,
                "body": body
            }),
        )
    }

    pub fn return_statement(&mut self, expression: Option<Value>) -> Value {
        let text = match &expression {
            Some(expression) => format!("return {};", self.text(expression)),
            None => "return;".to_string(),
        };
        self.node("ReturnStatement", &text, json!({ "expression": expression }))
    }

    pub fn break_statement(&mut self) -> Value {
        self.node("BreakStatement", "break;", json!({}))
    }

    pub fn continue_statement(&mut self) -> Value {
        self.node("ContinueStatement", "continue;", json!({}))
    }

    pub fn throw_statement(&mut self) -> Value {
        self.node("ThrowStatement", "throw;", json!({}))
    }

    pub fn revert_statement(&mut self, error: &str) -> Value {
        let call = self.call(error, vec![]);
        self.node(
            "RevertStatement",
            &format!("revert {}();", error),
            json!({ "revertCall": call }),
        )
    }

    pub fn emit(&mut self, event: &str, arguments: Vec<Value>) -> Value {
        let call = self.call(event, arguments);
        self.node("EmitStatement", &format!("emit {}();", event), json!({ "eventCall": call }))
    }

    pub fn try_statement(&mut self, expression: Value, body: Value, catch_bodies: Vec<Value>) -> Value {
        let catch_clauses: Vec<Value> = catch_bodies
            .into_iter()
            .map(|body| {
                self.node(
                    "CatchClause",
                    "catch",
                    json!({
                        "isReasonStringType": false,
                        "kind": null,
                        "parameters": null,
                        "body": body
                    }),
                )
            })
            .collect();
        let text = format!("try {}", self.text(&expression));
        self.node(
            "TryStatement",
            &text,
            json!({
                "expression": expression,
                "returnParameters": null,
                "body": body,
                "catchClauses": catch_clauses
            }),
        )
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    pub fn identifier(&mut self, name: &str) -> Value {
        self.node("Identifier", name, json!({ "name": name }))
    }

    pub fn number(&mut self, value: &str) -> Value {
        self.node(
            "NumberLiteral",
            value,
            json!({ "number": value, "subdenomination": null }),
        )
    }

    pub fn number_with_unit(&mut self, value: &str, unit: &str) -> Value {
        self.node(
            "NumberLiteral",
            &format!("{} {}", value, unit),
            json!({ "number": value, "subdenomination": unit }),
        )
    }

    pub fn string(&mut self, value: &str) -> Value {
        self.node(
            "StringLiteral",
            &format!("\"{}\"", value),
            json!({ "value": value, "parts": [value], "isUnicode": [false] }),
        )
    }

    pub fn boolean(&mut self, value: bool) -> Value {
        self.node("BooleanLiteral", &value.to_string(), json!({ "value": value }))
    }

    pub fn hex_literal(&mut self, value: &str) -> Value {
        self.node(
            "HexLiteral",
            &format!("hex\"{}\"", value),
            json!({ "value": value, "parts": [value] }),
        )
    }

    pub fn binary(&mut self, operator: &str, left: Value, right: Value) -> Value {
        let text = format!("{} {} {}", self.text(&left), operator, self.text(&right));
        self.node(
            "BinaryOperation",
            &text,
            json!({ "operator": operator, "left": left, "right": right }),
        )
    }

    pub fn unary(&mut self, operator: &str, operand: Value, prefix: bool) -> Value {
        let inner = self.text(&operand);
        let text = if prefix {
            format!("{}{}", operator, inner)
        } else {
            format!("{}{}", inner, operator)
        };
        self.node(
            "UnaryOperation",
            &text,
            json!({ "operator": operator, "subExpression": operand, "isPrefix": prefix }),
        )
    }

    pub fn call(&mut self, name: &str, arguments: Vec<Value>) -> Value {
        let callee = self.identifier(name);
        self.call_expression(callee, arguments)
    }

    pub fn call_expression(&mut self, callee: Value, arguments: Vec<Value>) -> Value {
        let args: Vec<String> = arguments.iter().map(|arg| self.text(arg)).collect();
        let text = format!("{}({})", self.text(&callee), args.join(", "));
        self.node(
            "FunctionCall",
            &text,
            json!({
                "expression": callee,
                "arguments": arguments,
                "names": [],
                "identifiers": []
            }),
        )
    }

    pub fn member(&mut self, expression: Value, member: &str) -> Value {
        let text = format!("{}.{}", self.text(&expression), member);
        self.node(
            "MemberAccess",
            &text,
            json!({ "expression": expression, "memberName": member }),
        )
    }

    /// `lhs = rhs;`
    pub fn assign(&mut self, name: &str, value: Value) -> Value {
        let target = self.identifier(name);
        let assignment = self.binary("=", target, value);
        self.expression_statement(assignment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Regular,
    Constructor,
    Fallback,
    Receive,
}
