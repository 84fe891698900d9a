//! Control-flow graphs
//!
//! - domain/: graph storage, nodes, edges, per-function graphs
//! - infrastructure/: AST-driven builder
//! - application/: build graphs and derive objectives for one file

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{BuildFlowGraphsUseCase, FlowGraphResult};
pub use domain::*;
pub use infrastructure::CfgBuilder;
pub use ports::FlowAnalyzer;
