mod approach_level;

pub use approach_level::{approach_level, is_executed};
