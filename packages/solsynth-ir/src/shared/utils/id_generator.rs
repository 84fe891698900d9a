//! ID generation utilities
//!
//! Graph node, objective and target ids are derived from source locations so
//! that two builds of the same file produce identical ids.

use crate::shared::models::SourceLocation;

/// ID Generator for location-derived ids
pub struct IdGenerator;

impl IdGenerator {
    /// Generate a node ID from a file path and a location
    ///
    /// Format: `file:startLine:startCol-endLine:endCol:startOffset-endOffset`
    pub fn generate_location_id(file_path: &str, location: &SourceLocation) -> String {
        format!(
            "{}:{}:{}-{}:{}:{}-{}",
            file_path,
            location.start.line,
            location.start.column,
            location.end.line,
            location.end.column,
            location.start_offset,
            location.end_offset
        )
    }

    /// Generate the id of a synthetic node owned by another node
    ///
    /// Used for entry/exit nodes, branch outcomes and loop heads.
    pub fn generate_synthetic_id(owner_id: &str, suffix: &str) -> String {
        format!("{}#{}", owner_id, suffix)
    }

    /// Generate an edge ID
    pub fn generate_edge_id(source_id: &str, target_id: &str, kind: &str) -> String {
        format!("{}->{}:{}", source_id, target_id, kind)
    }
}
