mod constant_pool;
mod literal;

pub use constant_pool::ConstantPool;
pub use literal::{parse_number_literal, unit_multiplier, LiteralValue};
