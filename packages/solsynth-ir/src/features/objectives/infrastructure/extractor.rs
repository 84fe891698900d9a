//! Objective extraction from function graphs
//!
//! 1. Every outgoing edge of a control node (out-degree > 1) yields a branch
//!    objective keyed by the edge target.
//! 2. Children of a branch objective: forward worklist over outgoing edges,
//!    skipping BACK_EDGE and visited edges, stopping at other objectives.
//! 3. Function objective: follow the single-successor chain from ENTRY; the
//!    branch objectives at the first control node become its children.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::features::flow_graph::domain::{CfgEdgeType, ControlFlowFunction, ControlFlowProgram};
use crate::features::objectives::domain::{CoverageObjective, ObjectiveModel};
use crate::shared::models::{AnalysisError, NodeId, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveExtractor;

impl ObjectiveExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Objectives for every function of a file
    pub fn extract_program(&self, program: &ControlFlowProgram) -> Result<ObjectiveModel> {
        let mut model = ObjectiveModel::new();
        for function in &program.functions {
            let function_model = self
                .extract(function)
                .map_err(|e| e.with_file(program.file_path.clone()))?;
            model.merge(function_model);
        }
        Ok(model)
    }

    /// Objectives for one function graph
    pub fn extract(&self, function: &ControlFlowFunction) -> Result<ObjectiveModel> {
        let mut model = ObjectiveModel::new();
        let graph = &function.graph;

        // Branch objectives
        for control in graph.control_nodes() {
            for edge in graph.outgoing(&control.id) {
                if function.is_reserved(&edge.target) {
                    return Err(AnalysisError::objective(format!(
                        "branch objective from '{}' targets reserved node '{}'",
                        control.id, edge.target
                    )));
                }
                let inserted = model.insert(CoverageObjective::branch(
                    edge.target.clone(),
                    function.id.clone(),
                    function.name.clone(),
                    control.id.clone(),
                    edge.edge_type,
                ));
                if !inserted {
                    debug!(target = %edge.target, "branch target shared by several control nodes");
                }
            }
        }

        // Branch children
        let ids: Vec<NodeId> = model.objectives().iter().map(|o| o.id.clone()).collect();
        for id in &ids {
            let children = self.reachable_objectives(function, &model, id);
            if let Some(objective) = model.get_mut(id) {
                objective.children = children;
            }
        }

        // Function objective
        let mut function_objective = CoverageObjective::function(function.id.clone(), function.name.clone());
        function_objective.children = self.function_children(function, &model)?;
        model.insert(function_objective);

        model.check_acyclic()?;
        debug!(
            function = %function.name,
            objectives = model.len(),
            "extracted objectives"
        );
        Ok(model)
    }

    fn reachable_objectives(
        &self,
        function: &ControlFlowFunction,
        model: &ObjectiveModel,
        start: &str,
    ) -> Vec<NodeId> {
        let graph = &function.graph;
        let mut children = Vec::new();
        let mut seen_children: FxHashSet<&str> = FxHashSet::default();
        let mut visited_edges: FxHashSet<&str> = FxHashSet::default();
        let mut worklist: VecDeque<&str> = VecDeque::from([start]);

        while let Some(node) = worklist.pop_front() {
            for edge in graph.outgoing(node) {
                if edge.edge_type == CfgEdgeType::BackEdge || !visited_edges.insert(edge.id.as_str()) {
                    continue;
                }
                let target = edge.target.as_str();
                if target == start {
                    continue;
                }
                if model.contains(target) {
                    if seen_children.insert(target) {
                        children.push(target.to_string());
                    }
                    continue;
                }
                worklist.push_back(target);
            }
        }
        children
    }

    fn function_children(
        &self,
        function: &ControlFlowFunction,
        model: &ObjectiveModel,
    ) -> Result<Vec<NodeId>> {
        let graph = &function.graph;
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut current = function.entry.as_str();

        loop {
            if !visited.insert(current) {
                // Unconditional loop without a branch
                return Ok(Vec::new());
            }
            let outgoing = graph.outgoing(current);
            match outgoing.len() {
                0 => return Ok(Vec::new()),
                1 => current = outgoing[0].target.as_str(),
                _ => {
                    let mut children = Vec::with_capacity(outgoing.len());
                    for edge in outgoing {
                        if !model.contains(&edge.target) {
                            return Err(AnalysisError::objective(format!(
                                "control node '{}' has an edge to '{}' without an objective",
                                current, edge.target
                            )));
                        }
                        children.push(edge.target.clone());
                    }
                    return Ok(children);
                }
            }
        }
    }
}
