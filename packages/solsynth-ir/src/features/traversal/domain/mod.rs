/// Continue signal returned by enter handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitFlow {
    /// Visit children, then run exit handlers
    #[default]
    Continue,
    /// Prune the subtree; exit handlers for this node are skipped too
    Skip,
}

impl VisitFlow {
    pub fn is_skip(self) -> bool {
        self == VisitFlow::Skip
    }
}
