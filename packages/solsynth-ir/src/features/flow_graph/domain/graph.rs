//! Control flow graph storage
//!
//! petgraph `DiGraph` plus an id → index map. Node ids are unique per build;
//! inserting an id twice is a fatal error rather than a silent overwrite.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};

use super::cfg::{CfgEdge, CfgEdgeType, CfgNode, CfgNodeKind};
use crate::shared::models::{AnalysisError, NodeId, Result};
use crate::shared::IdGenerator;

#[derive(Debug, Clone, Default)]
pub struct ControlFlowGraph {
    graph: DiGraph<CfgNode, CfgEdge>,
    id_to_index: FxHashMap<NodeId, NodeIndex>,
    edge_ids: FxHashSet<String>,
}

impl ControlFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node; duplicate ids are fatal
    pub fn add_node(&mut self, node: CfgNode) -> Result<NodeIndex> {
        if self.id_to_index.contains_key(&node.id) {
            return Err(AnalysisError::control_flow(format!(
                "duplicate graph node id '{}'",
                node.id
            )));
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_index.insert(id, idx);
        Ok(idx)
    }

    /// Connect two existing nodes
    ///
    /// Returns `false` when the same typed edge already exists.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        edge_type: CfgEdgeType,
        label: impl Into<String>,
    ) -> Result<bool> {
        let (Some(&from), Some(&to)) = (self.id_to_index.get(source), self.id_to_index.get(target))
        else {
            return Err(AnalysisError::control_flow(format!(
                "edge {} -> {} references an unknown node",
                source, target
            )));
        };

        let id = IdGenerator::generate_edge_id(source, target, edge_type.as_str());
        if !self.edge_ids.insert(id.clone()) {
            return Ok(false);
        }
        self.graph.add_edge(
            from,
            to,
            CfgEdge {
                id,
                edge_type,
                label: label.into(),
                source: source.to_string(),
                target: target.to_string(),
            },
        );
        Ok(true)
    }

    /// Copy every node and edge of `other` into this graph
    pub fn absorb(&mut self, other: &ControlFlowGraph) -> Result<()> {
        for node in other.nodes() {
            self.add_node(node.clone())?;
        }
        for edge in other.edges() {
            self.add_edge(&edge.source, &edge.target, edge.edge_type, edge.label.clone())?;
        }
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&CfgNode> {
        self.id_to_index.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CfgNode> {
        self.graph.node_weights()
    }

    pub fn edges(&self) -> impl Iterator<Item = &CfgEdge> {
        self.graph.edge_weights()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Outgoing edges in insertion order
    pub fn outgoing(&self, id: &str) -> Vec<&CfgEdge> {
        self.edges_directed(id, Direction::Outgoing)
    }

    /// Incoming edges in insertion order
    pub fn incoming(&self, id: &str) -> Vec<&CfgEdge> {
        self.edges_directed(id, Direction::Incoming)
    }

    fn edges_directed(&self, id: &str, direction: Direction) -> Vec<&CfgEdge> {
        let Some(&idx) = self.id_to_index.get(id) else {
            return Vec::new();
        };
        // petgraph walks adjacency lists newest-first
        let mut edges: Vec<&CfgEdge> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| edge.weight())
            .collect();
        edges.reverse();
        edges
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.id_to_index
            .get(id)
            .map(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }

    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.outgoing(id).into_iter().map(|e| e.target.as_str()).collect()
    }

    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.incoming(id).into_iter().map(|e| e.source.as_str()).collect()
    }

    /// Nodes with more than one outgoing edge
    pub fn control_nodes(&self) -> Vec<&CfgNode> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.edges_directed(idx, Direction::Outgoing).count() > 1)
            .map(|idx| &self.graph[idx])
            .collect()
    }

    pub fn nodes_of_kind(&self, kind: CfgNodeKind) -> Vec<&CfgNode> {
        self.nodes().filter(|node| node.kind == kind).collect()
    }

    /// Graph nodes whose statements include the given line
    pub fn nodes_on_line(&self, line: u32) -> Vec<&CfgNode> {
        self.nodes()
            .filter(|node| node.metadata.lines.contains(&line))
            .collect()
    }
}

/// One function's graph with its reserved nodes
#[derive(Debug, Clone)]
pub struct ControlFlowFunction {
    pub id: NodeId,
    pub name: String,
    pub contract: Option<String>,
    pub entry: NodeId,
    pub success_exit: NodeId,
    pub error_exit: NodeId,
    pub graph: ControlFlowGraph,
}

impl ControlFlowFunction {
    /// Whether `id` is the ENTRY / SUCCESS_EXIT / ERROR_EXIT of this function
    pub fn is_reserved(&self, id: &str) -> bool {
        id == self.entry || id == self.success_exit || id == self.error_exit
    }

    /// Check single-entry / two-exit well-formedness
    pub fn validate(&self) -> Result<()> {
        let expect = |id: &str, kind: CfgNodeKind, what: &str| -> Result<()> {
            match self.graph.node(id) {
                Some(node) if node.kind == kind => Ok(()),
                _ => Err(AnalysisError::control_flow(format!(
                    "function '{}' has no {} node",
                    self.name, what
                ))),
            }
        };
        expect(&self.entry, CfgNodeKind::Entry, "ENTRY")?;
        expect(&self.success_exit, CfgNodeKind::Exit, "SUCCESS_EXIT")?;
        expect(&self.error_exit, CfgNodeKind::Exit, "ERROR_EXIT")?;

        let entries = self.graph.nodes_of_kind(CfgNodeKind::Entry).len();
        let exits = self.graph.nodes_of_kind(CfgNodeKind::Exit).len();
        if entries != 1 || exits != 2 {
            return Err(AnalysisError::control_flow(format!(
                "function '{}' has {} ENTRY and {} EXIT nodes",
                self.name, entries, exits
            )));
        }
        Ok(())
    }
}

/// All graphs of one source file
#[derive(Debug, Clone, Default)]
pub struct ControlFlowProgram {
    pub file_path: String,
    /// Union of every function graph
    pub graph: ControlFlowGraph,
    pub functions: Vec<ControlFlowFunction>,
}

impl ControlFlowProgram {
    pub fn function(&self, id: &str) -> Option<&ControlFlowFunction> {
        self.functions.iter().find(|f| f.id == id)
    }

    pub fn function_by_name(&self, name: &str) -> Option<&ControlFlowFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Function owning a graph node
    pub fn function_of_node(&self, node_id: &str) -> Option<&ControlFlowFunction> {
        self.functions.iter().find(|f| f.graph.contains(node_id))
    }
}
