//! Execution traces reported by the test runner

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::models::{AnalysisError, Position, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraceKind {
    Statement,
    Function,
    Branch,
    RequirePre,
    RequirePost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLocation {
    pub start: Position,
    pub end: Position,
}

/// One instrumented point of the program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub path: String,
    pub location: TraceLocation,
    pub hits: u64,
    /// Condition text or bare operator of a branch record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Operand values observed at the point (`left`, `right`, `value`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, Value>>,
    /// Side of a branch record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<bool>,
}

impl TraceRecord {
    pub fn is_covered(&self) -> bool {
        self.hits > 0
    }

    pub fn line(&self) -> u32 {
        self.location.start.line
    }

    /// Numeric operand; numbers and numeric strings are accepted
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.variables.as_ref()?.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

/// All records of one test execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionTrace {
    pub records: Vec<TraceRecord>,
}

impl ExecutionTrace {
    pub fn new(records: Vec<TraceRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AnalysisError::trace(format!("malformed execution trace: {}", e)).with_source(e))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of `file_path` starting on `line`
    pub fn on_line<'t>(&'t self, file_path: &'t str, line: u32) -> impl Iterator<Item = &'t TraceRecord> + 't {
        self.records
            .iter()
            .filter(move |r| r.line() == line && paths_match(&r.path, file_path))
    }

    /// Whether any covered record of the given kinds starts on one of `lines`
    pub fn hit_on_lines(&self, file_path: &str, lines: &[u32], kinds: &[TraceKind]) -> bool {
        lines.iter().any(|&line| {
            self.on_line(file_path, line)
                .any(|r| r.is_covered() && kinds.contains(&r.kind))
        })
    }

    /// Passes and failures of the guards starting on `lines`
    ///
    /// A guard failed as often as it was reached without being passed.
    pub fn require_outcomes(&self, file_path: &str, lines: &[u32]) -> (u64, u64) {
        let hits = |kind: TraceKind| -> u64 {
            lines
                .iter()
                .flat_map(|&line| self.on_line(file_path, line))
                .filter(|r| r.kind == kind)
                .map(|r| r.hits)
                .sum()
        };
        let reached = hits(TraceKind::RequirePre);
        let passed = hits(TraceKind::RequirePost);
        (passed, reached.saturating_sub(passed))
    }
}

/// Runner paths are often absolute while analysis paths are project-relative
pub fn paths_match(a: &str, b: &str) -> bool {
    a == b || a.ends_with(&format!("/{}", b)) || b.ends_with(&format!("/{}", a))
}
