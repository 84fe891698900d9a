/*
 * Project analysis
 *
 * Files are independent until merge time: each one is analyzed on its own
 * (in parallel when enabled), then constant pools, target catalogs and
 * import lists are merged in path order. A file that fails is reported
 * and left out; the others still contribute.
 */

use std::collections::BTreeMap;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, warn};

use super::file_analyzer::{FileAnalysis, FileAnalyzer, SourceFile};
use crate::config::ValidatedConfig;
use crate::features::ast::AstHub;
use crate::features::constants::ConstantPool;
use crate::features::dependencies::DependencyGraph;
use crate::features::targets::TargetCatalog;
use crate::shared::models::{AnalysisError, Result};

/// A file whose analysis failed
#[derive(Debug)]
pub struct FileFailure {
    pub file_path: String,
    pub error: AnalysisError,
}

/// Merged view over every analyzed file
#[derive(Debug)]
pub struct ProjectAnalysis {
    /// Successful analyses, sorted by path
    pub files: Vec<FileAnalysis>,
    pub constants: ConstantPool,
    pub catalog: TargetCatalog,
    pub dependencies: DependencyGraph,
    pub failures: Vec<FileFailure>,
}

impl ProjectAnalysis {
    pub fn file(&self, file_path: &str) -> Option<&FileAnalysis> {
        self.files.iter().find(|f| f.file_path == file_path)
    }

    pub fn objective_count(&self) -> usize {
        self.files.iter().map(|f| f.objectives.len()).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct ProjectAnalyzer {
    analyzer: FileAnalyzer,
}

impl ProjectAnalyzer {
    pub fn new(config: ValidatedConfig) -> Self {
        Self {
            analyzer: FileAnalyzer::new(config),
        }
    }

    /// Parse and analyze raw parser output
    pub fn analyze_sources(&self, sources: Vec<SourceFile>) -> Result<ProjectAnalysis> {
        let mut hubs = Vec::with_capacity(sources.len());
        let mut failures = Vec::new();
        for source in sources {
            let file_path = source.path.clone();
            match source.into_hub() {
                Ok(hub) => hubs.push(hub),
                Err(error) => failures.push(FileFailure { file_path, error }),
            }
        }
        let mut analysis = self.analyze(&hubs)?;
        failures.append(&mut analysis.failures);
        failures.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        analysis.failures = failures;
        Ok(analysis)
    }

    /// Analyze every hub and merge the results
    ///
    /// Errors only when the worker pool cannot be created; per-file errors
    /// land in `failures`.
    pub fn analyze(&self, hubs: &[AstHub]) -> Result<ProjectAnalysis> {
        let start = Instant::now();
        let results = self.run(hubs)?;

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for (hub, result) in hubs.iter().zip(results) {
            match result {
                Ok(analysis) => files.push(analysis),
                Err(error) => {
                    warn!(file = %hub.file_path(), error = %error, "file analysis failed");
                    failures.push(FileFailure {
                        file_path: hub.file_path().to_string(),
                        error,
                    });
                }
            }
        }
        files.sort_by(|a, b| a.file_path.cmp(&b.file_path));

        let mut constants = ConstantPool::new();
        let mut catalog = TargetCatalog::new();
        let mut imports = BTreeMap::new();
        for file in &files {
            constants.merge(&file.constants);
            catalog.add_file(file.file_path.clone(), file.targets.clone());
            imports.insert(file.file_path.clone(), file.imports.clone());
        }
        let dependencies = DependencyGraph::build(&imports);
        if dependencies.has_cycles() {
            warn!(cycles = dependencies.cycles().len(), "import cycles detected");
        }

        info!(
            files = files.len(),
            failed = failures.len(),
            targets = catalog.len(),
            constants = constants.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "project analyzed"
        );

        Ok(ProjectAnalysis {
            files,
            constants,
            catalog,
            dependencies,
            failures,
        })
    }

    #[cfg(feature = "parallel")]
    fn run(&self, hubs: &[AstHub]) -> Result<Vec<Result<FileAnalysis>>> {
        let parallel = self.analyzer.config().parallel();
        if !parallel.enabled {
            return Ok(self.run_sequential(hubs));
        }

        let analyze = || -> Vec<Result<FileAnalysis>> {
            hubs.par_iter()
                .map(|hub| self.analyzer.analyze(hub))
                .collect()
        };

        if parallel.num_threads == 0 {
            return Ok(analyze());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(parallel.num_threads)
            .build()
            .map_err(|e| AnalysisError::internal(format!("failed to build thread pool: {}", e)))?;
        Ok(pool.install(analyze))
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, hubs: &[AstHub]) -> Result<Vec<Result<FileAnalysis>>> {
        Ok(self.run_sequential(hubs))
    }

    fn run_sequential(&self, hubs: &[AstHub]) -> Vec<Result<FileAnalysis>> {
        hubs.iter().map(|hub| self.analyzer.analyze(hub)).collect()
    }
}
