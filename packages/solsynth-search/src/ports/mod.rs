mod crossover;
mod sampler;

pub use crossover::Crossover;
pub use sampler::Sampler;
