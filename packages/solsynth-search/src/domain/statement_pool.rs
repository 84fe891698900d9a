//! Reusable statements of one test case, indexed by type string

use std::collections::BTreeMap;

use rand::{Rng, RngCore};
use rustc_hash::FxHashSet;

use super::statement::{Statement, StatementId};

/// Statements already present in a test case
///
/// Function calls are not indexed: their results are never passed on as
/// arguments. Draws hand out copies that keep the original id, so a reused
/// statement decodes to a reference to the earlier declaration.
#[derive(Debug, Clone, Default)]
pub struct StatementPool {
    by_type: BTreeMap<String, Vec<Statement>>,
    ids: FxHashSet<StatementId>,
}

impl StatementPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every statement reachable from `roots`
    pub fn from_roots(roots: &[Statement]) -> Self {
        let mut pool = Self::new();
        for root in roots {
            pool.add_tree(root);
        }
        pool
    }

    pub fn add_tree(&mut self, statement: &Statement) {
        statement.visit(&mut |s| self.add(s));
    }

    /// Index one statement; repeated ids are ignored
    pub fn add(&mut self, statement: &Statement) {
        if matches!(statement, Statement::FunctionCall(_)) || !self.ids.insert(statement.id()) {
            return;
        }
        self.by_type
            .entry(statement.type_string())
            .or_default()
            .push(statement.copy());
    }

    pub fn candidates(&self, type_string: &str) -> &[Statement] {
        self.by_type.get(type_string).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &StatementId) -> bool {
        self.ids.contains(id)
    }

    /// Uniform draw among statements of `type_string`
    pub fn random(&self, rng: &mut dyn RngCore, type_string: &str) -> Option<Statement> {
        self.random_where(rng, type_string, |_| true)
    }

    /// Uniform draw among statements of `type_string` accepted by `filter`
    pub fn random_where(
        &self,
        rng: &mut dyn RngCore,
        type_string: &str,
        filter: impl Fn(&Statement) -> bool,
    ) -> Option<Statement> {
        let candidates: Vec<&Statement> = self
            .candidates(type_string)
            .iter()
            .filter(|s| filter(s))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..candidates.len());
        Some(candidates[index].copy())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
