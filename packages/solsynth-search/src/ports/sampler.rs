use rand::RngCore;
use solsynth_ir::config::SamplingConfig;
use solsynth_ir::{FunctionTarget, TypeDescriptor};

use crate::domain::statement::fresh_id;
use crate::domain::{Statement, StatementId, StatementPool, TestCase};
use crate::error::SearchResult;

/// Source of fresh statements
///
/// Every method that may reuse existing statements takes the pool to draw
/// from; an empty pool means fresh construction only. All randomness comes
/// from `rng()`, so a seeded sampler replays the same sequence.
pub trait Sampler {
    fn rng(&mut self) -> &mut dyn RngCore;

    fn config(&self) -> &SamplingConfig;

    /// Id for a newly built statement or test case
    fn next_id(&mut self) -> StatementId {
        fresh_id(self.rng())
    }

    fn sample_test_case(&mut self) -> SearchResult<TestCase>;

    /// Deployment or function call usable as a test-case root
    fn sample_root(&mut self, pool: &StatementPool) -> SearchResult<Statement>;

    fn sample_constructor_call(
        &mut self,
        contract_id: &str,
        depth: usize,
        pool: &StatementPool,
    ) -> SearchResult<Statement>;

    fn sample_function_call(
        &mut self,
        function: &FunctionTarget,
        depth: usize,
        pool: &StatementPool,
    ) -> SearchResult<Statement>;

    /// Value for a parameter of the given type
    fn sample_argument(
        &mut self,
        type_descriptor: &TypeDescriptor,
        depth: usize,
        pool: &StatementPool,
    ) -> SearchResult<Statement>;

    fn sample_sender(&mut self, pool: &StatementPool) -> SearchResult<Statement>;
}
