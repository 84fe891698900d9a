/*
 * Solsynth Search - test-case chromosomes for Solidity contracts
 *
 * Layout:
 * - domain/         : Statements, test cases, statement pool, decoding
 * - ports/          : Sampler and crossover traits
 * - infrastructure/ : Random sampler, tree crossover, test file decoder
 *
 * Statements are built for the targets of a `solsynth_ir::TargetCatalog`
 * and seeded with literals from its `ConstantPool`. Decoded test cases are
 * Truffle JavaScript; running them and scoring traces happen elsewhere.
 */

// Crate-level lint configuration
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::len_without_is_empty)] // Chromosomes are never empty
#![allow(clippy::large_enum_variant)] // Call statements carry their targets

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports
// ═══════════════════════════════════════════════════════════════════════════

/// Chromosome model
pub mod domain;

/// Error types
pub mod error;

/// Infrastructure implementations
pub mod infrastructure;

/// Sampling and recombination traits
pub mod ports;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use domain::{Decoding, DecodingContext, Position, Statement, StatementId, StatementPool, TestCase};
pub use error::{ErrorKind, SearchError, SearchResult};
pub use infrastructure::{RandomSampler, TestCaseDecoder, TreeCrossover};
pub use ports::{Crossover, Sampler};
