//! Source location types
//!
//! Positions as reported by the Solidity parser: 1-based lines, 0-based
//! columns, and an inclusive byte range.

use serde::{Deserialize, Serialize};

/// Single position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Location of an AST node
///
/// `end_offset` is inclusive, matching the parser's `range` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position, start_offset: usize, end_offset: usize) -> Self {
        Self {
            start,
            end,
            start_offset,
            end_offset,
        }
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start.line <= line && line <= self.end.line
    }

    pub fn contains(&self, other: &SourceLocation) -> bool {
        self.start_offset <= other.start_offset && other.end_offset <= self.end_offset
    }

    /// Every line the location touches
    pub fn lines(&self) -> Vec<u32> {
        if self.end.line >= self.start.line {
            (self.start.line..=self.end.line).collect()
        } else {
            Vec::new()
        }
    }

    pub fn line_count(&self) -> u32 {
        if self.end.line >= self.start.line {
            self.end.line - self.start.line + 1
        } else {
            0
        }
    }
}
