//! Project import graph
//!
//! Nodes are resolved file paths; an edge A → B means A imports B.
//! Supports Tarjan SCC for import cycles and a dependencies-first order.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};

use super::import::ImportDependency;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// file → files it imports
    graph: DiGraph<String, ()>,
    path_to_node: FxHashMap<String, NodeIndex>,
    /// Strongly connected components with more than one file
    cycles: Vec<Vec<String>>,
    topo_order: Vec<String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-file import lists
    ///
    /// Nodes are added in path order so every derived ordering is stable.
    pub fn build(imports: &BTreeMap<String, Vec<ImportDependency>>) -> Self {
        let mut all_files: BTreeSet<&str> = imports.keys().map(String::as_str).collect();
        for dependencies in imports.values() {
            for dependency in dependencies {
                all_files.insert(dependency.resolved.as_str());
            }
        }

        let mut graph = DiGraph::new();
        let mut path_to_node = FxHashMap::default();
        for file in all_files {
            let idx = graph.add_node(file.to_string());
            path_to_node.insert(file.to_string(), idx);
        }

        let mut seen: FxHashSet<(NodeIndex, NodeIndex)> = FxHashSet::default();
        for (from, dependencies) in imports {
            let Some(&from_idx) = path_to_node.get(from) else {
                continue;
            };
            for dependency in dependencies {
                // No self-loops
                if &dependency.resolved == from {
                    continue;
                }
                if let Some(&to_idx) = path_to_node.get(&dependency.resolved) {
                    if seen.insert((from_idx, to_idx)) {
                        graph.add_edge(from_idx, to_idx, ());
                    }
                }
            }
        }

        let cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut files: Vec<String> = scc.into_iter().map(|idx| graph[idx].clone()).collect();
                files.sort();
                files
            })
            .collect();

        let topo_order = Self::compute_topological_order(&graph);

        Self {
            graph,
            path_to_node,
            cycles,
            topo_order,
        }
    }

    /// Kahn's algorithm over reversed edges: imported files come first
    ///
    /// Files caught in an import cycle never reach in-degree zero; they are
    /// appended afterwards in path order.
    fn compute_topological_order(graph: &DiGraph<String, ()>) -> Vec<String> {
        let mut pending: Vec<usize> = vec![0; graph.node_count()];
        for edge in graph.edge_references() {
            pending[edge.source().index()] += 1;
        }

        let mut queue: VecDeque<NodeIndex> = graph
            .node_indices()
            .filter(|idx| pending[idx.index()] == 0)
            .collect();
        let mut placed = vec![false; graph.node_count()];
        let mut order = Vec::with_capacity(graph.node_count());

        while let Some(idx) = queue.pop_front() {
            placed[idx.index()] = true;
            order.push(graph[idx].clone());
            let mut importers: Vec<NodeIndex> =
                graph.neighbors_directed(idx, Direction::Incoming).collect();
            importers.sort();
            for importer in importers {
                pending[importer.index()] -= 1;
                if pending[importer.index()] == 0 {
                    queue.push_back(importer);
                }
            }
        }

        for idx in graph.node_indices() {
            if !placed[idx.index()] {
                order.push(graph[idx].clone());
            }
        }
        order
    }

    /// Files importing `file_path`
    pub fn dependents(&self, file_path: &str) -> Vec<String> {
        self.neighbors(file_path, Direction::Incoming)
    }

    /// Files imported by `file_path`
    pub fn dependencies(&self, file_path: &str) -> Vec<String> {
        self.neighbors(file_path, Direction::Outgoing)
    }

    fn neighbors(&self, file_path: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.path_to_node.get(file_path) else {
            return Vec::new();
        };
        let mut files: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|idx| self.graph[idx].clone())
            .collect();
        files.sort();
        files
    }

    /// Files `file_path` depends on, directly or not
    pub fn transitive_dependencies(&self, file_path: &str) -> Vec<String> {
        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut queue = VecDeque::new();
        if let Some(&idx) = self.path_to_node.get(file_path) {
            queue.push_back(idx);
        }
        while let Some(idx) = queue.pop_front() {
            for neighbor in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                if visited.insert(self.graph[neighbor].clone()) {
                    queue.push_back(neighbor);
                }
            }
        }
        visited.remove(file_path);
        visited.into_iter().collect()
    }

    /// Dependencies-first order
    pub fn topological_order(&self) -> &[String] {
        &self.topo_order
    }

    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    pub fn contains(&self, file_path: &str) -> bool {
        self.path_to_node.contains_key(file_path)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
