mod cfg;
mod graph;

pub use cfg::{CfgEdge, CfgEdgeType, CfgNode, CfgNodeKind, ConstructKind, NodeMetadata};
pub use graph::{ControlFlowFunction, ControlFlowGraph, ControlFlowProgram};
