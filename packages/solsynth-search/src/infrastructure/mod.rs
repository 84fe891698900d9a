mod decoder;
mod random_sampler;
mod tree_crossover;

pub use decoder::TestCaseDecoder;
pub use random_sampler::RandomSampler;
pub use tree_crossover::TreeCrossover;
