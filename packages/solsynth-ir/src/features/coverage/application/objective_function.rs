//! Objective fitness
//!
//! Distance 0 means covered. Otherwise branch objectives score
//! `approach_level + normalized_branch_distance`; function objectives score 1.

use crate::features::coverage::domain::{branch_distance, ExecutionTrace, TraceKind, TraceRecord};
use crate::features::coverage::infrastructure::approach_level;
use crate::features::flow_graph::domain::{CfgEdgeType, ConstructKind, ControlFlowFunction, ControlFlowProgram};
use crate::features::objectives::{CoverageObjective, ObjectiveKind, ObjectiveModel};
use crate::shared::models::{AnalysisError, Result};

pub struct ObjectiveFunction<'p> {
    program: &'p ControlFlowProgram,
    objectives: &'p ObjectiveModel,
}

impl<'p> ObjectiveFunction<'p> {
    pub fn new(program: &'p ControlFlowProgram, objectives: &'p ObjectiveModel) -> Self {
        Self {
            program,
            objectives,
        }
    }

    pub fn objectives(&self) -> &'p ObjectiveModel {
        self.objectives
    }

    /// Distance of one objective under a trace
    pub fn distance(&self, objective: &CoverageObjective, trace: &ExecutionTrace) -> Result<f64> {
        if self.is_covered(objective, trace)? {
            return Ok(0.0);
        }
        if objective.kind == ObjectiveKind::Function {
            return Ok(1.0);
        }

        let function = self.function_of(objective)?;
        let control = self.control_node(objective)?;
        let file_path = self.program.file_path.as_str();

        let level = match approach_level(function, file_path, control, trace) {
            Some(level) => level,
            None => function.graph.control_nodes().len() as u32,
        };

        let distance = if level == 0 {
            self.branch_distance_at(objective, control, trace)
        } else {
            branch_distance(None, None, None, true)
        };
        Ok(f64::from(level) + distance)
    }

    /// Distances of every objective, in model order
    pub fn distances(&self, trace: &ExecutionTrace) -> Result<Vec<(String, f64)>> {
        self.objectives
            .objectives()
            .iter()
            .map(|objective| Ok((objective.id.clone(), self.distance(objective, trace)?)))
            .collect()
    }

    pub fn covered(&self, trace: &ExecutionTrace) -> Result<Vec<&'p CoverageObjective>> {
        let mut covered = Vec::new();
        for objective in self.objectives.objectives() {
            if self.is_covered(objective, trace)? {
                covered.push(objective);
            }
        }
        Ok(covered)
    }

    pub fn is_covered(&self, objective: &CoverageObjective, trace: &ExecutionTrace) -> Result<bool> {
        let function = self.function_of(objective)?;
        let file_path = self.program.file_path.as_str();

        if objective.kind == ObjectiveKind::Function {
            let header = function
                .graph
                .node(&function.entry)
                .map(|entry| entry.metadata.lines.clone())
                .unwrap_or_default();
            return Ok(trace.hit_on_lines(file_path, &header, &[TraceKind::Function]));
        }

        let control = self.control_node(objective)?;
        let control_lines = self.lines_of(function, control);

        // Branch record reporting the wanted side
        if let Some(wanted) = wanted_outcome(objective) {
            let reported = control_lines.iter().any(|&line| {
                trace.on_line(file_path, line).any(|record| {
                    record.kind == TraceKind::Branch
                        && record.is_covered()
                        && record.outcome == Some(wanted)
                })
            });
            if reported {
                return Ok(true);
            }

            // Guard records: the pass side is a post hit, the fail side is
            // every pre hit that never got past the guard
            if self.is_guard(function, control) {
                let (passed, failed) = trace.require_outcomes(file_path, &control_lines);
                let hit = if wanted { passed > 0 } else { failed > 0 };
                if hit {
                    return Ok(true);
                }
            }
        }

        // Statement hits on lines only the target side reaches
        let mut candidates = vec![objective.id.as_str()];
        candidates.extend(
            function
                .graph
                .successors(&objective.id)
                .into_iter()
                .filter(|id| !function.is_reserved(id))
                .filter(|id| function.graph.predecessors(id).len() == 1),
        );
        Ok(candidates.into_iter().any(|id| {
            let lines: Vec<u32> = self
                .lines_of(function, id)
                .into_iter()
                .filter(|line| !control_lines.contains(line))
                .collect();
            trace.hit_on_lines(file_path, &lines, &[TraceKind::Statement])
        }))
    }

    fn branch_distance_at(&self, objective: &CoverageObjective, control: &str, trace: &ExecutionTrace) -> f64 {
        let wanted = wanted_outcome(objective).unwrap_or(true);
        let file_path = self.program.file_path.as_str();
        let record: Option<&TraceRecord> = self
            .program
            .function(&objective.function_id)
            .map(|function| self.lines_of(function, control))
            .unwrap_or_default()
            .into_iter()
            .find_map(|line| {
                trace
                    .on_line(file_path, line)
                    .find(|r| r.kind == TraceKind::Branch && r.variables.is_some())
            });
        match record {
            Some(record) => branch_distance(
                record.condition.as_deref(),
                record.number("left"),
                record.number("right"),
                wanted,
            ),
            None => branch_distance(None, None, None, wanted),
        }
    }

    fn function_of(&self, objective: &CoverageObjective) -> Result<&'p ControlFlowFunction> {
        self.program.function(&objective.function_id).ok_or_else(|| {
            AnalysisError::trace(format!(
                "objective '{}' belongs to unknown function '{}'",
                objective.id, objective.function_id
            ))
        })
    }

    fn control_node<'o>(&self, objective: &'o CoverageObjective) -> Result<&'o str> {
        objective.control_node.as_deref().ok_or_else(|| {
            AnalysisError::internal(format!("branch objective '{}' has no control node", objective.id))
        })
    }

    fn is_guard(&self, function: &ControlFlowFunction, id: &str) -> bool {
        function
            .graph
            .node(id)
            .is_some_and(|node| node.construct() == Some(ConstructKind::Require))
    }

    fn lines_of(&self, function: &ControlFlowFunction, id: &str) -> Vec<u32> {
        function
            .graph
            .node(id)
            .map(|node| node.metadata.lines.clone())
            .unwrap_or_default()
    }
}

fn wanted_outcome(objective: &CoverageObjective) -> Option<bool> {
    match objective.edge_type? {
        CfgEdgeType::True => Some(true),
        CfgEdgeType::False => Some(false),
        _ => None,
    }
}
