//! Approach level over a function graph
//!
//! 0-1 breadth-first search backwards from the objective's control node:
//! stepping onto a control node costs 1, any other step costs 0. The first
//! executed node dequeued gives the level.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::features::coverage::domain::{ExecutionTrace, TraceKind};
use crate::features::flow_graph::domain::{CfgNode, ControlFlowFunction};

const EXECUTION_KINDS: [TraceKind; 5] = [
    TraceKind::Statement,
    TraceKind::Branch,
    TraceKind::Function,
    TraceKind::RequirePre,
    TraceKind::RequirePost,
];

/// Whether the trace shows `node` was executed
pub fn is_executed(node: &CfgNode, file_path: &str, trace: &ExecutionTrace) -> bool {
    trace.hit_on_lines(file_path, &node.metadata.lines, &EXECUTION_KINDS)
}

/// Control nodes between `start` and the closest executed node
///
/// `None` when no executed node reaches `start`.
pub fn approach_level(
    function: &ControlFlowFunction,
    file_path: &str,
    start: &str,
    trace: &ExecutionTrace,
) -> Option<u32> {
    let graph = &function.graph;
    let mut best: FxHashMap<&str, u32> = FxHashMap::default();
    let mut deque: VecDeque<(&str, u32)> = VecDeque::new();
    best.insert(start, 0);
    deque.push_back((start, 0));

    while let Some((id, cost)) = deque.pop_front() {
        if best.get(id).is_some_and(|&known| known < cost) {
            continue;
        }
        if graph.node(id).is_some_and(|node| is_executed(node, file_path, trace)) {
            return Some(cost);
        }
        for predecessor in graph.predecessors(id) {
            let step = u32::from(graph.out_degree(predecessor) > 1);
            let next = cost + step;
            if best.get(predecessor).is_some_and(|&known| known <= next) {
                continue;
            }
            best.insert(predecessor, next);
            if step == 0 {
                deque.push_front((predecessor, next));
            } else {
                deque.push_back((predecessor, next));
            }
        }
    }
    None
}
