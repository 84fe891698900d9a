//! Test-case chromosome
//!
//! An ordered list of root action statements (deployments and function
//! calls). There is always at least one root: construction rejects an empty
//! list and mutation never deletes the last root.

use rand::{Rng, RngCore};
use tracing::debug;
use uuid::Uuid;

use super::statement::{fresh_id, Statement};
use super::statement_pool::StatementPool;
use crate::error::{ErrorKind, SearchError, SearchResult};
use crate::ports::Sampler;

/// Path to a tree position: root index, then child indices
pub type Position = Vec<usize>;

#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub id: Uuid,
    roots: Vec<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TestCaseMutation {
    Insert,
    Mutate,
    Delete,
}

impl TestCase {
    /// Test case under a random id; searches use `with_id` with a seeded id
    pub fn new(roots: Vec<Statement>) -> SearchResult<Self> {
        Self::with_id(Uuid::new_v4(), roots)
    }

    pub fn with_id(id: Uuid, roots: Vec<Statement>) -> SearchResult<Self> {
        if roots.is_empty() {
            return Err(SearchError::new(
                ErrorKind::EmptyTestCase,
                "a test case needs at least one root statement",
            ));
        }
        if let Some(root) = roots.iter().find(|r| !r.is_action()) {
            return Err(SearchError::wrong_child_kind(format!(
                "test-case roots must be calls, got {}",
                root.label()
            )));
        }
        Ok(Self { id, roots })
    }

    pub fn roots(&self) -> &[Statement] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Statement> {
        self.roots
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Always false for a constructed test case
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Deep copy; test-case and statement ids are kept
    pub fn copy(&self) -> Self {
        self.copy_as(self.id)
    }

    /// Deep copy under another test-case id; statement ids are kept
    pub fn copy_as(&self, id: Uuid) -> Self {
        Self {
            id,
            roots: self.roots.iter().map(Statement::copy).collect(),
        }
    }

    pub fn statement_pool(&self) -> StatementPool {
        StatementPool::from_roots(&self.roots)
    }

    /// Insert a root, delete a root or mutate one root, chosen uniformly
    ///
    /// With a single root only insertion and mutation are possible.
    /// Insertion falls back to mutation when the root limit is reached.
    pub fn mutate(&self, sampler: &mut dyn Sampler) -> SearchResult<TestCase> {
        let pool = self.statement_pool();
        let mut roots: Vec<Statement> = self.roots.iter().map(Statement::copy).collect();

        let choice = if roots.len() > 1 {
            match sampler.rng().gen_range(0..3) {
                0 => TestCaseMutation::Insert,
                1 => TestCaseMutation::Delete,
                _ => TestCaseMutation::Mutate,
            }
        } else if sampler.rng().gen_bool(0.5) {
            TestCaseMutation::Insert
        } else {
            TestCaseMutation::Mutate
        };
        let choice = if choice == TestCaseMutation::Insert
            && roots.len() >= sampler.config().max_action_statements
        {
            TestCaseMutation::Mutate
        } else {
            choice
        };
        debug!(test_case = %self.id, roots = roots.len(), ?choice, "mutating test case");

        match choice {
            TestCaseMutation::Insert => {
                let root = sampler.sample_root(&pool)?;
                let at = sampler.rng().gen_range(0..=roots.len());
                roots.insert(at, root);
            }
            TestCaseMutation::Delete => {
                let at = sampler.rng().gen_range(0..roots.len());
                roots.remove(at);
            }
            TestCaseMutation::Mutate => {
                let at = sampler.rng().gen_range(0..roots.len());
                roots[at] = roots[at].mutate(sampler, &pool, 0)?;
            }
        }
        TestCase::with_id(sampler.next_id(), roots)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Positions
    // ═══════════════════════════════════════════════════════════════════════

    /// Every tree position, roots first in pre-order
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for (index, root) in self.roots.iter().enumerate() {
            collect_positions(root, vec![index], &mut positions);
        }
        positions
    }

    pub fn statement_at(&self, position: &[usize]) -> Option<&Statement> {
        let (first, rest) = position.split_first()?;
        let mut current = self.roots.get(*first)?;
        for index in rest {
            current = current.child(*index)?;
        }
        Some(current)
    }

    /// Replace the subtree at `position`, checking the slot accepts it
    ///
    /// Statements enclosing the position get new ids drawn from `rng`.
    pub fn replace_at(
        &mut self,
        position: &[usize],
        statement: Statement,
        rng: &mut dyn RngCore,
    ) -> SearchResult<()> {
        let Some((first, rest)) = position.split_first() else {
            return Err(SearchError::internal("empty tree position"));
        };
        let max = self.roots.len().saturating_sub(1);
        let Some(root) = self.roots.get_mut(*first) else {
            return Err(SearchError::invalid_child_index(*first, max, "test case"));
        };
        let Some((last, path)) = rest.split_last() else {
            if !statement.is_action() {
                return Err(SearchError::wrong_child_kind(format!(
                    "test-case roots must be calls, got {}",
                    statement.label()
                )));
            }
            *root = statement;
            return Ok(());
        };
        let mut parent = &mut *root;
        for index in path {
            let label = parent.label();
            let count = parent.child_count();
            parent = parent
                .child_mut(*index)
                .ok_or_else(|| SearchError::invalid_child_index(*index, count.saturating_sub(1), &label))?;
        }
        parent.set_child(*last, statement)?;

        // The enclosing statements changed: they must not alias their old versions
        let mut current = root;
        current.set_id(fresh_id(rng));
        for index in path {
            match current.child_mut(*index) {
                Some(child) => {
                    child.set_id(fresh_id(rng));
                    current = child;
                }
                None => break,
            }
        }
        Ok(())
    }
}

fn collect_positions(statement: &Statement, position: Position, out: &mut Vec<Position>) {
    out.push(position.clone());
    for (index, child) in statement.children().into_iter().enumerate() {
        let mut child_position = position.clone();
        child_position.push(index);
        collect_positions(child, child_position, out);
    }
}
