mod catalog;
mod target;
mod type_descriptor;

pub use catalog::TargetCatalog;
pub use target::{
    ContractKind, ContractTarget, FunctionTarget, Mutability, Parameter, Target, Visibility,
};
pub use type_descriptor::TypeDescriptor;
