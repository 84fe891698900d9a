//! Coverage objective forest
//!
//! Objectives live in an arena in creation order. A branch objective is
//! keyed by the graph node an outgoing edge of a control node leads to; a
//! function objective is keyed by the function id. Children are the
//! objectives reachable before any other objective is hit.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::features::flow_graph::domain::CfgEdgeType;
use crate::shared::models::{AnalysisError, NodeId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    Branch,
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageObjective {
    pub id: NodeId,
    pub kind: ObjectiveKind,
    pub function_id: NodeId,
    pub function_name: String,
    /// Control node the branch leaves from
    pub control_node: Option<NodeId>,
    /// Type of the edge from the control node
    pub edge_type: Option<CfgEdgeType>,
    pub children: Vec<NodeId>,
}

impl CoverageObjective {
    pub fn branch(
        id: impl Into<NodeId>,
        function_id: impl Into<NodeId>,
        function_name: impl Into<String>,
        control_node: impl Into<NodeId>,
        edge_type: CfgEdgeType,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ObjectiveKind::Branch,
            function_id: function_id.into(),
            function_name: function_name.into(),
            control_node: Some(control_node.into()),
            edge_type: Some(edge_type),
            children: Vec::new(),
        }
    }

    pub fn function(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            function_id: id.clone(),
            id,
            kind: ObjectiveKind::Function,
            function_name: name.into(),
            control_node: None,
            edge_type: None,
            children: Vec::new(),
        }
    }

    pub fn is_branch(&self) -> bool {
        self.kind == ObjectiveKind::Branch
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectiveModel {
    objectives: Vec<CoverageObjective>,
    index: FxHashMap<NodeId, usize>,
}

impl ObjectiveModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an objective; `false` when the id already exists
    pub fn insert(&mut self, objective: CoverageObjective) -> bool {
        if self.index.contains_key(&objective.id) {
            return false;
        }
        self.index.insert(objective.id.clone(), self.objectives.len());
        self.objectives.push(objective);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&CoverageObjective> {
        self.index.get(id).map(|&i| &self.objectives[i])
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut CoverageObjective> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.objectives[i]),
            None => None,
        }
    }

    pub fn objectives(&self) -> &[CoverageObjective] {
        &self.objectives
    }

    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }

    pub fn children(&self, id: &str) -> Vec<&CoverageObjective> {
        self.get(id)
            .map(|objective| {
                objective
                    .children
                    .iter()
                    .filter_map(|child| self.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn function_objectives(&self) -> Vec<&CoverageObjective> {
        self.objectives
            .iter()
            .filter(|o| o.kind == ObjectiveKind::Function)
            .collect()
    }

    pub fn branch_objectives(&self) -> Vec<&CoverageObjective> {
        self.objectives
            .iter()
            .filter(|o| o.kind == ObjectiveKind::Branch)
            .collect()
    }

    /// Objectives that are nobody's child
    pub fn roots(&self) -> Vec<&CoverageObjective> {
        let children: FxHashSet<&str> = self
            .objectives
            .iter()
            .flat_map(|o| o.children.iter().map(String::as_str))
            .collect();
        self.objectives
            .iter()
            .filter(|o| !children.contains(o.id.as_str()))
            .collect()
    }

    /// Append another model (other file or function)
    pub fn merge(&mut self, other: ObjectiveModel) {
        for objective in other.objectives {
            self.insert(objective);
        }
    }

    /// Fail when some objective is its own ancestor
    pub fn check_acyclic(&self) -> Result<()> {
        // 0 = unvisited, 1 = on stack, 2 = done
        let mut state = vec![0u8; self.objectives.len()];
        for start in 0..self.objectives.len() {
            if state[start] != 0 {
                continue;
            }
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            state[start] = 1;
            while let Some((current, next_child)) = stack.last().copied() {
                let children = &self.objectives[current].children;
                if next_child >= children.len() {
                    state[current] = 2;
                    stack.pop();
                    continue;
                }
                let child_id = &children[next_child];
                if let Some(top) = stack.last_mut() {
                    top.1 += 1;
                }
                let Some(&child) = self.index.get(child_id) else {
                    continue;
                };
                match state[child] {
                    0 => {
                        state[child] = 1;
                        stack.push((child, 0));
                    }
                    1 => {
                        return Err(AnalysisError::objective(format!(
                            "objective '{}' is its own ancestor",
                            child_id
                        )))
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
