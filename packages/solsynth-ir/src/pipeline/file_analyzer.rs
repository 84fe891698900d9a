use tracing::info;

use crate::config::ValidatedConfig;
use crate::features::ast::AstHub;
use crate::features::constants::{ConstantExtractor, ConstantPool};
use crate::features::dependencies::{DependencyExtractor, ImportDependency};
use crate::features::flow_graph::{BuildFlowGraphsUseCase, CfgBuilder, ControlFlowProgram};
use crate::features::objectives::ObjectiveModel;
use crate::features::targets::{Target, TargetExtractor};
use crate::shared::models::Result;

/// Parser output for one file, before it is wrapped in a hub
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    pub source: String,
    pub ast_json: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, source: impl Into<String>, ast_json: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            ast_json: ast_json.into(),
        }
    }

    pub fn into_hub(self) -> Result<AstHub> {
        AstHub::from_json(self.path, self.source, &self.ast_json)
    }
}

/// Everything derived from one file
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub file_path: String,
    pub program: ControlFlowProgram,
    pub objectives: ObjectiveModel,
    pub constants: ConstantPool,
    pub imports: Vec<ImportDependency>,
    pub targets: Vec<Target>,
}

pub struct FileAnalyzer {
    config: ValidatedConfig,
}

impl FileAnalyzer {
    pub fn new(config: ValidatedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    pub fn analyze(&self, hub: &AstHub) -> Result<FileAnalysis> {
        let use_case = BuildFlowGraphsUseCase::new(CfgBuilder::new(self.config.control_flow()));
        let flow = use_case.execute(hub)?;

        let constants = if self.config.constant_pool().enabled {
            ConstantExtractor::extract(hub)?
        } else {
            ConstantPool::new()
        };
        let imports = DependencyExtractor::extract(hub)?;
        let targets = TargetExtractor::extract(hub)?;

        info!(
            file = %hub.file_path(),
            functions = flow.program.functions.len(),
            objectives = flow.objectives.len(),
            constants = constants.len(),
            targets = targets.len(),
            "file analyzed"
        );

        Ok(FileAnalysis {
            file_path: hub.file_path().to_string(),
            program: flow.program,
            objectives: flow.objectives,
            constants,
            imports,
            targets,
        })
    }
}
