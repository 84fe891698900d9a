use rand::RngCore;

use crate::domain::TestCase;
use crate::error::SearchResult;

pub trait Crossover: Send + Sync {
    /// Two offspring from exactly two parents
    fn crossover(
        &self,
        parents: &[TestCase],
        rng: &mut dyn RngCore,
    ) -> SearchResult<(TestCase, TestCase)>;
}
