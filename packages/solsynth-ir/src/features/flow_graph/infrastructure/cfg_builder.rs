/*
 * CFG Builder
 *
 * One graph per function / modifier, built by walking the body with the
 * traversal engine. Each graph has a single ENTRY and two exits:
 * SUCCESS_EXIT (normal completion, return) and ERROR_EXIT (throw, revert).
 *
 * State per function walk:
 * - parents: nodes the next statement connects from
 * - pending edge type for the next connection
 * - break / continue target stacks, one level per enclosing loop
 * - return / throw node sets, wired to the exits at finalization
 */

use std::mem;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::config::ControlFlowConfig;
use crate::features::ast::{AstHub, NodeRef, NodeType};
use crate::features::flow_graph::domain::{
    CfgEdgeType, CfgNode, CfgNodeKind, ConstructKind, ControlFlowFunction, ControlFlowGraph,
    ControlFlowProgram,
};
use crate::features::flow_graph::ports::FlowAnalyzer;
use crate::features::traversal::{traverse, AstVisitor, VisitFlow};
use crate::shared::models::{AnalysisError, NodeId, Result};
use crate::shared::IdGenerator;

pub const ENTRY_SUFFIX: &str = "entry";
pub const SUCCESS_EXIT_SUFFIX: &str = "success_exit";
pub const ERROR_EXIT_SUFFIX: &str = "error_exit";

/// Builds control flow graphs for every function of a source unit
#[derive(Debug, Clone, Default)]
pub struct CfgBuilder {
    config: ControlFlowConfig,
}

impl CfgBuilder {
    pub fn new(config: ControlFlowConfig) -> Self {
        Self { config }
    }

    /// Build the graphs of every function and modifier in the file
    pub fn build(&self, hub: &AstHub) -> Result<ControlFlowProgram> {
        let root = hub.root()?;
        let mut collector = DefinitionCollector::default();
        traverse(&root, &mut collector)?;

        let mut program = ControlFlowProgram {
            file_path: hub.file_path().to_string(),
            ..Default::default()
        };
        let mut name_counts: FxHashMap<String, usize> = FxHashMap::default();

        for definition in &collector.definitions {
            let base_name = display_name(&definition.node, definition.contract.as_deref());
            let seen = name_counts.entry(base_name.clone()).or_insert(0);
            let name = if *seen == 0 {
                base_name
            } else {
                format!("{}#{}", base_name, seen)
            };
            *seen += 1;

            let function = self.build_function(&definition.node, definition.contract.clone(), name)?;
            program
                .graph
                .absorb(&function.graph)
                .map_err(|e| e.with_file(hub.file_path()))?;
            program.functions.push(function);
        }

        info!(
            file = hub.file_path(),
            functions = program.functions.len(),
            nodes = program.graph.node_count(),
            edges = program.graph.edge_count(),
            "built control flow graphs"
        );
        Ok(program)
    }

    fn build_function(
        &self,
        node: &NodeRef<'_>,
        contract: Option<String>,
        name: String,
    ) -> Result<ControlFlowFunction> {
        let function_id = node.id()?;
        let header_line = node.location()?.start.line;
        let mut builder = FunctionGraphBuilder::new(
            &self.config,
            node.hub().file_path(),
            &function_id,
            &name,
            header_line,
        )?;

        if let Some(body) = node.child("body") {
            traverse(&body, &mut builder)?;
        }

        let function = builder.finish(function_id, name, contract)?;
        debug!(
            function = %function.name,
            nodes = function.graph.node_count(),
            edges = function.graph.edge_count(),
            "built function graph"
        );
        Ok(function)
    }
}

impl FlowAnalyzer for CfgBuilder {
    fn build_program(&self, hub: &AstHub) -> Result<ControlFlowProgram> {
        self.build(hub)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Definition collection
// ═══════════════════════════════════════════════════════════════════════════

struct Definition<'a> {
    node: NodeRef<'a>,
    contract: Option<String>,
}

#[derive(Default)]
struct DefinitionCollector<'a> {
    contracts: Vec<String>,
    definitions: Vec<Definition<'a>>,
}

impl<'a> AstVisitor<'a> for DefinitionCollector<'a> {
    fn enter(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        match node.node_type() {
            NodeType::ContractDefinition => {
                let name = node.str_attr("name").unwrap_or_default().to_string();
                self.contracts.push(name);
                Ok(VisitFlow::Continue)
            }
            NodeType::FunctionDefinition | NodeType::ModifierDefinition => {
                self.definitions.push(Definition {
                    node: node.clone(),
                    contract: self.contracts.last().cloned(),
                });
                Ok(VisitFlow::Skip)
            }
            _ => Ok(VisitFlow::Continue),
        }
    }

    fn exit(&mut self, node: &NodeRef<'a>) -> Result<()> {
        if node.is_type(NodeType::ContractDefinition) {
            self.contracts.pop();
        }
        Ok(())
    }
}

/// `Contract.name`, with `constructor` / `fallback` / `receive` for the
/// special kinds
pub fn display_name(node: &NodeRef<'_>, contract: Option<&str>) -> String {
    let base = if node.bool_attr("isConstructor") {
        "constructor"
    } else if node.bool_attr("isReceiveEther") {
        "receive"
    } else if node.bool_attr("isFallback") {
        "fallback"
    } else {
        match node.str_attr("name") {
            Some(name) if !name.is_empty() => name,
            _ => "fallback",
        }
    };
    match contract {
        Some(contract) => format!("{}.{}", contract, base),
        None => base.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Per-function graph construction
// ═══════════════════════════════════════════════════════════════════════════

struct FunctionGraphBuilder<'c> {
    config: &'c ControlFlowConfig,
    file_path: String,
    function_name: String,
    graph: ControlFlowGraph,
    created: usize,
    entry: NodeId,
    success_exit: NodeId,
    error_exit: NodeId,
    parents: Vec<NodeId>,
    pending_edge: CfgEdgeType,
    break_stack: Vec<Vec<NodeId>>,
    continue_stack: Vec<Vec<NodeId>>,
    returns: Vec<NodeId>,
    throws: Vec<NodeId>,
    unmatched_jumps: Vec<NodeId>,
}

impl<'c> FunctionGraphBuilder<'c> {
    fn new(
        config: &'c ControlFlowConfig,
        file_path: &str,
        function_id: &str,
        function_name: &str,
        header_line: u32,
    ) -> Result<Self> {
        let entry = IdGenerator::generate_synthetic_id(function_id, ENTRY_SUFFIX);
        let success_exit = IdGenerator::generate_synthetic_id(function_id, SUCCESS_EXIT_SUFFIX);
        let error_exit = IdGenerator::generate_synthetic_id(function_id, ERROR_EXIT_SUFFIX);

        let mut builder = Self {
            config,
            file_path: file_path.to_string(),
            function_name: function_name.to_string(),
            graph: ControlFlowGraph::new(),
            created: 0,
            entry: entry.clone(),
            success_exit: success_exit.clone(),
            error_exit: error_exit.clone(),
            parents: Vec::new(),
            pending_edge: CfgEdgeType::Normal,
            break_stack: Vec::new(),
            continue_stack: Vec::new(),
            returns: Vec::new(),
            throws: Vec::new(),
            unmatched_jumps: Vec::new(),
        };

        builder.create(
            CfgNode::new(entry.clone(), CfgNodeKind::Entry, "ENTRY")
                .with_construct(ConstructKind::Entry)
                .with_lines(vec![header_line]),
        )?;
        builder.create(
            CfgNode::new(success_exit, CfgNodeKind::Exit, "SUCCESS_EXIT")
                .with_construct(ConstructKind::SuccessExit),
        )?;
        builder.create(
            CfgNode::new(error_exit, CfgNodeKind::Exit, "ERROR_EXIT")
                .with_construct(ConstructKind::ErrorExit),
        )?;
        builder.parents.push(entry);
        Ok(builder)
    }

    // ───────────────────────────────────────────────────────────────────────
    // Node / edge primitives
    // ───────────────────────────────────────────────────────────────────────

    fn create(&mut self, node: CfgNode) -> Result<NodeId> {
        let id = node.id.clone();
        self.graph
            .add_node(node)
            .map_err(|e| e.with_file(self.file_path.clone()))?;
        self.created += 1;
        Ok(id)
    }

    fn edge(&mut self, source: &str, target: &str, edge_type: CfgEdgeType) -> Result<()> {
        self.graph
            .add_edge(source, target, edge_type, edge_type.as_str())
            .map(|_| ())
            .map_err(|e| e.with_file(self.file_path.clone()))
    }

    /// Create a node, connect every current parent to it with the pending
    /// edge type, and make it the only parent
    fn append(&mut self, node: CfgNode) -> Result<NodeId> {
        let id = self.create(node)?;
        let edge_type = mem::replace(&mut self.pending_edge, CfgEdgeType::Normal);
        for parent in mem::take(&mut self.parents) {
            self.edge(&parent, &id, edge_type)?;
        }
        self.parents.push(id.clone());
        Ok(id)
    }

    fn append_statement(&mut self, node: &NodeRef<'_>, construct: ConstructKind) -> Result<NodeId> {
        let id = node.id()?;
        let cfg_node = CfgNode::new(id.clone(), CfgNodeKind::Normal, label_of(node)?)
            .with_statement(id)
            .with_construct(construct)
            .with_lines(node.location()?.lines());
        self.append(cfg_node)
    }

    /// Condition node for a branching statement
    ///
    /// Lines and label come from the condition expression when present.
    fn append_condition(
        &mut self,
        node: &NodeRef<'_>,
        condition: Option<&NodeRef<'_>>,
        construct: ConstructKind,
    ) -> Result<NodeId> {
        let id = node.id()?;
        let mut cfg_node = CfgNode::new(id.clone(), CfgNodeKind::Normal, "")
            .with_statement(id)
            .with_construct(construct);
        match condition {
            Some(condition) => {
                let text = condition.source()?.trim().to_string();
                cfg_node.label = text.clone();
                cfg_node = cfg_node
                    .with_condition(text)
                    .with_lines(condition.location()?.lines());
            }
            None => {
                cfg_node.label = label_of(node)?;
                cfg_node = cfg_node.with_lines(vec![node.location()?.start.line]);
            }
        }
        self.append(cfg_node)
    }

    /// True / false outcome node hanging off a condition node
    fn append_outcome(&mut self, control: &str, outcome: bool) -> Result<NodeId> {
        let (suffix, edge_type) = if outcome {
            ("true", CfgEdgeType::True)
        } else {
            ("false", CfgEdgeType::False)
        };
        let lines = self
            .graph
            .node(control)
            .map(|node| node.metadata.lines.clone())
            .unwrap_or_default();
        let id = IdGenerator::generate_synthetic_id(control, suffix);
        let cfg_node = CfgNode::new(id, CfgNodeKind::Normal, suffix)
            .with_construct(ConstructKind::BranchOutcome)
            .with_outcome(outcome)
            .with_lines(lines);

        self.parents = vec![control.to_string()];
        self.pending_edge = edge_type;
        self.append(cfg_node)
    }

    fn visit_body<'a>(&mut self, body: Option<NodeRef<'a>>) -> Result<()> {
        if let Some(body) = body {
            traverse(&body, self)?;
        }
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────
    // Constructs
    // ───────────────────────────────────────────────────────────────────────

    fn visit_if<'a>(&mut self, node: &NodeRef<'a>) -> Result<()> {
        let condition = node.child("condition");
        let id = self.append_condition(node, condition.as_ref(), ConstructKind::Condition)?;

        self.append_outcome(&id, true)?;
        self.visit_body(node.child("trueBody"))?;
        let mut ends = mem::take(&mut self.parents);

        self.append_outcome(&id, false)?;
        self.visit_body(node.child("falseBody"))?;
        ends.append(&mut self.parents);

        self.parents = ends;
        Ok(())
    }

    fn visit_while<'a>(&mut self, node: &NodeRef<'a>) -> Result<()> {
        let condition = node.child("condition");
        let id = self.append_condition(node, condition.as_ref(), ConstructKind::LoopCondition)?;
        self.enter_loop();

        self.append_outcome(&id, true)?;
        self.visit_body(node.child("body"))?;
        let (breaks, continues) = self.exit_loop();
        for end in mem::take(&mut self.parents).into_iter().chain(continues) {
            self.edge(&end, &id, CfgEdgeType::BackEdge)?;
        }

        self.append_outcome(&id, false)?;
        self.parents.extend(breaks);
        Ok(())
    }

    fn visit_do_while<'a>(&mut self, node: &NodeRef<'a>) -> Result<()> {
        let id = node.id()?;
        let head = IdGenerator::generate_synthetic_id(&id, "head");
        let head_node = CfgNode::new(head.clone(), CfgNodeKind::Normal, "do")
            .with_statement(id)
            .with_construct(ConstructKind::LoopHead)
            .with_lines(vec![node.location()?.start.line]);
        self.append(head_node)?;
        self.enter_loop();

        self.visit_body(node.child("body"))?;
        let (breaks, continues) = self.exit_loop();
        self.parents.extend(continues);

        let condition = node.child("condition");
        let cond = self.append_condition(node, condition.as_ref(), ConstructKind::LoopCondition)?;

        let true_outcome = self.append_outcome(&cond, true)?;
        self.edge(&true_outcome, &head, CfgEdgeType::BackEdge)?;

        self.append_outcome(&cond, false)?;
        self.parents.extend(breaks);
        Ok(())
    }

    fn visit_for<'a>(&mut self, node: &NodeRef<'a>) -> Result<()> {
        if let Some(init) = node.child("initExpression") {
            self.append_statement(&init, ConstructKind::Statement)?;
        }

        let condition = node.child("conditionExpression");
        let loop_target = match &condition {
            Some(condition) => {
                let id = self.append_condition(node, Some(condition), ConstructKind::LoopCondition)?;
                self.append_outcome(&id, true)?;
                id
            }
            None => {
                let id = node.id()?;
                let head = IdGenerator::generate_synthetic_id(&id, "head");
                let head_node = CfgNode::new(head, CfgNodeKind::Normal, "for")
                    .with_statement(id)
                    .with_construct(ConstructKind::LoopHead)
                    .with_lines(vec![node.location()?.start.line]);
                self.append(head_node)?
            }
        };
        self.enter_loop();

        self.visit_body(node.child("body"))?;
        let (breaks, continues) = self.exit_loop();
        self.parents.extend(continues);

        if let Some(update) = node.child("loopExpression") {
            self.append_statement(&update, ConstructKind::LoopUpdate)?;
        }
        for end in mem::take(&mut self.parents) {
            self.edge(&end, &loop_target, CfgEdgeType::BackEdge)?;
        }

        if condition.is_some() {
            self.append_outcome(&loop_target, false)?;
        }
        self.parents.extend(breaks);
        Ok(())
    }

    fn visit_try<'a>(&mut self, node: &NodeRef<'a>) -> Result<()> {
        let id = node.id()?;
        let (label, lines) = match node.child("expression") {
            Some(expression) => (
                expression.source()?.trim().to_string(),
                expression.location()?.lines(),
            ),
            None => (label_of(node)?, vec![node.location()?.start.line]),
        };
        let try_node = CfgNode::new(id.clone(), CfgNodeKind::Normal, label)
            .with_statement(id.clone())
            .with_construct(ConstructKind::TryCall)
            .with_lines(lines.clone());
        self.append(try_node)?;

        let success = CfgNode::new(
            IdGenerator::generate_synthetic_id(&id, "success"),
            CfgNodeKind::Normal,
            "success",
        )
        .with_construct(ConstructKind::TrySuccess)
        .with_outcome(true)
        .with_lines(lines);
        self.append(success)?;
        self.visit_body(node.child("body"))?;
        let mut ends = mem::take(&mut self.parents);

        for clause in node.children_of("catchClauses") {
            let clause_id = clause.id()?;
            let catch_node = CfgNode::new(clause_id.clone(), CfgNodeKind::Normal, label_of(&clause)?)
                .with_statement(clause_id)
                .with_construct(ConstructKind::CatchOutcome)
                .with_outcome(false)
                .with_lines(vec![clause.location()?.start.line]);

            self.parents = vec![id.clone()];
            self.pending_edge = CfgEdgeType::Exception;
            self.append(catch_node)?;
            self.visit_body(clause.child("body"))?;
            ends.append(&mut self.parents);
        }

        self.parents = ends;
        Ok(())
    }

    fn visit_return(&mut self, node: &NodeRef<'_>) -> Result<()> {
        let id = self.append_statement(node, ConstructKind::Return)?;
        self.returns.push(id);
        self.parents.clear();
        Ok(())
    }

    fn visit_throw(&mut self, node: &NodeRef<'_>) -> Result<()> {
        let id = self.append_statement(node, ConstructKind::Throw)?;
        self.throws.push(id);
        self.parents.clear();
        Ok(())
    }

    /// Guard call: the true side continues, the false side reverts
    fn visit_require(&mut self, node: &NodeRef<'_>) -> Result<()> {
        let condition = node
            .child("expression")
            .and_then(|call| call.children_of("arguments").into_iter().next());
        let control = self.append_condition(node, condition.as_ref(), ConstructKind::Require)?;

        let passed = self.append_outcome(&control, true)?;
        let failed = self.append_outcome(&control, false)?;
        self.throws.push(failed);
        self.parents = vec![passed];
        Ok(())
    }

    fn visit_jump(&mut self, node: &NodeRef<'_>, is_break: bool) -> Result<()> {
        let construct = if is_break {
            ConstructKind::Break
        } else {
            ConstructKind::Continue
        };
        let id = self.append_statement(node, construct)?;
        self.parents.clear();

        let stack = if is_break {
            &mut self.break_stack
        } else {
            &mut self.continue_stack
        };
        match stack.last_mut() {
            Some(targets) => targets.push(id),
            None if self.config.syntax_forgiving => {
                warn!(
                    function = %self.function_name,
                    node = %id,
                    "{} outside of a loop",
                    node.node_type()
                );
                self.unmatched_jumps.push(id);
            }
            None => {
                return Err(AnalysisError::control_flow(format!(
                    "{} outside of a loop in '{}'",
                    node.node_type(),
                    self.function_name
                ))
                .with_file(self.file_path.clone())
                .with_line(node.location()?.start.line));
            }
        }
        Ok(())
    }

    fn enter_loop(&mut self) {
        self.break_stack.push(Vec::new());
        self.continue_stack.push(Vec::new());
    }

    /// Pop the innermost loop level: (breaks, continues)
    fn exit_loop(&mut self) -> (Vec<NodeId>, Vec<NodeId>) {
        (
            self.break_stack.pop().unwrap_or_default(),
            self.continue_stack.pop().unwrap_or_default(),
        )
    }

    // ───────────────────────────────────────────────────────────────────────
    // Finalization
    // ───────────────────────────────────────────────────────────────────────

    fn finish(
        mut self,
        id: NodeId,
        name: String,
        contract: Option<String>,
    ) -> Result<ControlFlowFunction> {
        let success_exit = self.success_exit.clone();
        let error_exit = self.error_exit.clone();

        self.pending_edge = CfgEdgeType::Normal;
        for parent in mem::take(&mut self.parents) {
            self.edge(&parent, &success_exit, CfgEdgeType::Normal)?;
        }
        for node in mem::take(&mut self.returns) {
            self.edge(&node, &success_exit, CfgEdgeType::Normal)?;
        }
        for node in mem::take(&mut self.throws) {
            self.edge(&node, &error_exit, CfgEdgeType::Exception)?;
        }

        let open_levels = self.break_stack.len() + self.continue_stack.len();
        if open_levels > 0 || !self.unmatched_jumps.is_empty() {
            warn!(
                function = %name,
                unmatched = self.unmatched_jumps.len(),
                open_levels,
                "unmatched break/continue; jumps treated as terminal"
            );
            for node in mem::take(&mut self.unmatched_jumps) {
                self.edge(&node, &success_exit, CfgEdgeType::Normal)?;
            }
        }

        if self.graph.node_count() != self.created {
            return Err(AnalysisError::control_flow(format!(
                "function '{}' holds {} nodes but {} were created",
                name,
                self.graph.node_count(),
                self.created
            ))
            .with_file(self.file_path.clone()));
        }

        let function = ControlFlowFunction {
            id,
            name,
            contract,
            entry: self.entry,
            success_exit,
            error_exit,
            graph: self.graph,
        };
        function
            .validate()
            .map_err(|e| e.with_file(self.file_path.clone()))?;
        Ok(function)
    }
}

impl<'a, 'c> AstVisitor<'a> for FunctionGraphBuilder<'c> {
    fn enter_statement(&mut self, node: &NodeRef<'a>) -> Result<VisitFlow> {
        match node.node_type() {
            // Statements inside are visited in order; no node of their own
            NodeType::Block | NodeType::UncheckedStatement => return Ok(VisitFlow::Continue),
            NodeType::IfStatement => self.visit_if(node)?,
            NodeType::WhileStatement => self.visit_while(node)?,
            NodeType::DoWhileStatement => self.visit_do_while(node)?,
            NodeType::ForStatement => self.visit_for(node)?,
            NodeType::TryStatement => self.visit_try(node)?,
            NodeType::ReturnStatement => self.visit_return(node)?,
            NodeType::ThrowStatement | NodeType::RevertStatement => self.visit_throw(node)?,
            NodeType::BreakStatement => self.visit_jump(node, true)?,
            NodeType::ContinueStatement => self.visit_jump(node, false)?,
            NodeType::ExpressionStatement if builtin_call(node) == Some("revert") => self.visit_throw(node)?,
            NodeType::ExpressionStatement if matches!(builtin_call(node), Some("require" | "assert")) => {
                self.visit_require(node)?
            }
            _ => {
                self.append_statement(node, ConstructKind::Statement)?;
            }
        }
        Ok(VisitFlow::Skip)
    }
}

/// Callee name of a statement like `revert(...)` or `require(...)`
fn builtin_call<'a>(node: &NodeRef<'a>) -> Option<&'a str> {
    node.child("expression")
        .filter(|call| call.is_type(NodeType::FunctionCall))
        .and_then(|call| call.child("expression"))
        .filter(|callee| callee.is_type(NodeType::Identifier))
        .and_then(|callee| callee.str_attr("name"))
}

/// First source line of a node
fn label_of(node: &NodeRef<'_>) -> Result<String> {
    let source = node.source()?;
    Ok(source.lines().next().unwrap_or_default().trim().to_string())
}
