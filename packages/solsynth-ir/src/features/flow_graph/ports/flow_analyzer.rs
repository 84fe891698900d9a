use crate::features::ast::AstHub;
use crate::features::flow_graph::domain::ControlFlowProgram;
use crate::shared::models::Result;

pub trait FlowAnalyzer: Send + Sync {
    fn build_program(&self, hub: &AstHub) -> Result<ControlFlowProgram>;
}
