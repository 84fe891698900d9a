//! Target catalog
//!
//! Contracts and their callable members, with parameter types, for the
//! sampler to build actions from.

pub mod domain;
pub mod infrastructure;

pub use domain::{
    ContractKind, ContractTarget, FunctionTarget, Mutability, Parameter, Target, TargetCatalog,
    TypeDescriptor, Visibility,
};
pub use infrastructure::TargetExtractor;
