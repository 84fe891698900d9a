//! Shared module - Common types and utilities
//!
//! Types shared across all features. Depends on serde only.

pub mod models;
pub mod utils;

// Re-exports for convenience
pub use models::*;
pub use utils::id_generator::IdGenerator;
