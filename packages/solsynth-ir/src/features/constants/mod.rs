//! Literal constants observed in source
//!
//! Number, string and address literals are pooled with their occurrence
//! counts so sampling can favour values the contract actually compares
//! against.

pub mod domain;
pub mod infrastructure;

pub use domain::{parse_number_literal, ConstantPool, LiteralValue};
pub use infrastructure::ConstantExtractor;
