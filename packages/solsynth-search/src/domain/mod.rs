//! Chromosome model: statements, test cases, statement pool, decoding

pub mod bounds;
mod decoding;
pub mod statement;
mod statement_pool;
mod test_case;

pub use decoding::{Decoding, DecodingContext};
pub use statement::{
    AddressStatement, AddressValue, ArrayStatement, BoolStatement, BytesStatement,
    ConstructorCall, FunctionCall, IntegerStatement, MappingStatement, NumericStatement,
    Statement, StatementId, StringStatement,
};
pub use statement_pool::StatementPool;
pub use test_case::{Position, TestCase};
