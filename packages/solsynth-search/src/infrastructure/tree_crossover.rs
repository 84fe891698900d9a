//! Type-directed subtree exchange
//!
//! Every tree position of both parents is a swap candidate; a pair of
//! positions is compatible when each statement may stand in the other's slot
//! (same type string, and same contract for deployments). One compatible pair is chosen uniformly and the subtrees are
//! swapped (deep copies). Without a compatible pair the offspring are copies
//! of the parents.

use rand::{Rng, RngCore};
use tracing::debug;

use crate::domain::statement::fresh_id;
use crate::domain::{Position, Statement, TestCase};
use crate::error::{ErrorKind, SearchError, SearchResult};
use crate::ports::Crossover;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeCrossover;

impl TreeCrossover {
    pub fn new() -> Self {
        Self
    }

    /// Position pairs whose statements can trade places
    pub fn compatible_pairs(first: &TestCase, second: &TestCase) -> Vec<(Position, Position)> {
        let left = placed(first);
        let right = placed(second);

        let mut pairs = Vec::new();
        for (left_position, left_statement) in &left {
            for (right_position, right_statement) in &right {
                if left_statement.is_interchangeable_with(right_statement) {
                    pairs.push((left_position.clone(), right_position.clone()));
                }
            }
        }
        pairs
    }
}

fn placed(case: &TestCase) -> Vec<(Position, &Statement)> {
    case.positions()
        .into_iter()
        .filter_map(|p| case.statement_at(&p).map(|s| (p.clone(), s)))
        .collect()
}

impl Crossover for TreeCrossover {
    fn crossover(
        &self,
        parents: &[TestCase],
        rng: &mut dyn RngCore,
    ) -> SearchResult<(TestCase, TestCase)> {
        let [first, second] = parents else {
            return Err(SearchError::new(
                ErrorKind::CrossoverArity,
                format!("crossover needs exactly 2 parents, got {}", parents.len()),
            ));
        };

        let pairs = Self::compatible_pairs(first, second);
        let mut left = first.copy_as(fresh_id(rng));
        let mut right = second.copy_as(fresh_id(rng));
        if pairs.is_empty() {
            debug!("no type-compatible positions; offspring are parent copies");
            return Ok((left, right));
        }

        let (left_position, right_position) = &pairs[rng.gen_range(0..pairs.len())];
        let (Some(from_left), Some(from_right)) = (
            first.statement_at(left_position),
            second.statement_at(right_position),
        ) else {
            return Err(SearchError::internal("crossover position vanished"));
        };
        let from_left = from_left.copy();
        let from_right = from_right.copy();

        left.replace_at(left_position, from_right, rng)?;
        right.replace_at(right_position, from_left, rng)?;
        debug!(
            candidates = pairs.len(),
            ?left_position,
            ?right_position,
            "swapped subtrees"
        );
        Ok((left, right))
    }
}
