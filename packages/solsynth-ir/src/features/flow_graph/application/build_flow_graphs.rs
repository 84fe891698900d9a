use tracing::debug;

use crate::features::ast::AstHub;
use crate::features::flow_graph::domain::ControlFlowProgram;
use crate::features::flow_graph::ports::FlowAnalyzer;
use crate::features::objectives::{ObjectiveExtractor, ObjectiveModel};
use crate::shared::models::Result;

/// Graphs of one file plus the objectives derived from them
#[derive(Debug, Clone)]
pub struct FlowGraphResult {
    pub program: ControlFlowProgram,
    pub objectives: ObjectiveModel,
}

pub struct BuildFlowGraphsUseCase<A: FlowAnalyzer> {
    analyzer: A,
    extractor: ObjectiveExtractor,
}

impl<A: FlowAnalyzer> BuildFlowGraphsUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            extractor: ObjectiveExtractor::new(),
        }
    }

    pub fn execute(&self, hub: &AstHub) -> Result<FlowGraphResult> {
        let program = self.analyzer.build_program(hub)?;
        let objectives = self.extractor.extract_program(&program)?;
        debug!(
            file = %hub.file_path(),
            functions = program.functions.len(),
            objectives = objectives.len(),
            "flow graphs built"
        );
        Ok(FlowGraphResult {
            program,
            objectives,
        })
    }
}
