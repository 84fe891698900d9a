//! Control Flow Graph nodes and edges

use serde::{Deserialize, Serialize};

use crate::shared::models::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CfgNodeKind {
    Entry,
    Exit,
    Normal,
}

/// CFG Edge Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CfgEdgeType {
    Normal,    // Sequential flow
    True,      // Condition holds
    False,     // Condition fails
    BackEdge,  // Loop back to head / condition
    Exception, // Throw, revert, catch
}

impl CfgEdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CfgEdgeType::Normal => "NORMAL",
            CfgEdgeType::True => "TRUE",
            CfgEdgeType::False => "FALSE",
            CfgEdgeType::BackEdge => "BACK_EDGE",
            CfgEdgeType::Exception => "EXCEPTION",
        }
    }
}

/// Source construct a node was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructKind {
    Entry,
    SuccessExit,
    ErrorExit,
    Statement,
    Condition,
    LoopCondition,
    LoopHead,
    LoopUpdate,
    BranchOutcome,
    TryCall,
    TrySuccess,
    CatchOutcome,
    Return,
    Throw,
    /// `require` / `assert` guard
    Require,
    Break,
    Continue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Source lines covered by the node
    pub lines: Vec<u32>,
    pub construct: Option<ConstructKind>,
    /// Condition source text on branching nodes
    pub condition: Option<String>,
    /// Outcome on branch outcome nodes
    pub outcome: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfgNode {
    pub id: NodeId,
    pub kind: CfgNodeKind,
    pub label: String,
    /// Ids of the AST statements the node stands for
    pub statements: Vec<NodeId>,
    pub metadata: NodeMetadata,
}

impl CfgNode {
    pub fn new(id: impl Into<NodeId>, kind: CfgNodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            statements: Vec::new(),
            metadata: NodeMetadata::default(),
        }
    }

    pub fn with_statement(mut self, statement_id: impl Into<NodeId>) -> Self {
        self.statements.push(statement_id.into());
        self
    }

    pub fn with_construct(mut self, construct: ConstructKind) -> Self {
        self.metadata.construct = Some(construct);
        self
    }

    pub fn with_lines(mut self, lines: Vec<u32>) -> Self {
        self.metadata.lines = lines;
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.metadata.condition = Some(condition.into());
        self
    }

    pub fn with_outcome(mut self, outcome: bool) -> Self {
        self.metadata.outcome = Some(outcome);
        self
    }

    pub fn construct(&self) -> Option<ConstructKind> {
        self.metadata.construct
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgEdge {
    pub id: String,
    pub edge_type: CfgEdgeType,
    pub label: String,
    pub source: NodeId,
    pub target: NodeId,
}
