//! Configuration system
//!
//! Three levels of control:
//! - Preset: `SolsynthConfig::preset(Preset::Fast).build()?`
//! - Section override: `.sampling(|c| c.max_depth(3).seed(42))`
//! - YAML (versioned v1 schema): `SolsynthConfig::from_yaml("search.yaml")?`
//!
//! # Examples
//!
//! ```rust,ignore
//! use solsynth_ir::config::{Preset, SolsynthConfig};
//!
//! let config = SolsynthConfig::preset(Preset::Balanced)
//!     .control_flow(|c| c.syntax_forgiving(false))
//!     .sampling(|c| c.seed(7))
//!     .build()?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod section_configs;
pub mod solsynth_config;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use section_configs::{
    ConstantPoolConfig, ControlFlowConfig, ParallelConfig, SamplingConfig,
    DEFAULT_STRING_ALPHABET,
};
pub use solsynth_config::{SolsynthConfig, ValidatedConfig};
pub use validation::{validate_override, Validatable};
