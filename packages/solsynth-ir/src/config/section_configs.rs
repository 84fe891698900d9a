//! Per-section configurations
//!
//! Every section carries preset defaults, range validation and chainable
//! setters for closure overrides.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;

// ============================================================================
// Control flow
// ============================================================================

/// Control-flow graph construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlFlowConfig {
    /// Tolerate break/continue outside loops (warn instead of fail)
    pub syntax_forgiving: bool,
}

impl ControlFlowConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            syntax_forgiving: preset.forgives_syntax(),
        }
    }

    pub fn syntax_forgiving(mut self, v: bool) -> Self {
        self.syntax_forgiving = v;
        self
    }
}

impl Default for ControlFlowConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for ControlFlowConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "control_flow"
    }
}

// ============================================================================
// Constant pool
// ============================================================================

/// Literal constant pool extraction and draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstantPoolConfig {
    /// Extract constants from analyzed sources
    pub enabled: bool,

    /// Draw proportionally to occurrence count instead of uniformly
    pub frequency_weighted: bool,
}

impl ConstantPoolConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                enabled: true,
                frequency_weighted: false,
            },
            Preset::Balanced | Preset::Thorough | Preset::Custom => Self {
                enabled: true,
                frequency_weighted: true,
            },
        }
    }

    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    pub fn frequency_weighted(mut self, v: bool) -> Self {
        self.frequency_weighted = v;
        self
    }
}

impl Default for ConstantPoolConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for ConstantPoolConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "constant_pool"
    }
}

// ============================================================================
// Sampling
// ============================================================================

pub const DEFAULT_STRING_ALPHABET: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Chromosome sampling and mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,

    /// Maximum root action statements per test case (1..=1000)
    pub max_action_statements: usize,

    /// Maximum statement tree depth (1..=64)
    pub max_depth: usize,

    /// Probability of drawing a literal from the constant pool
    pub constant_pool_probability: f64,

    /// Probability of reusing a statement from the statement pool
    pub statement_pool_probability: f64,

    /// Probability of resampling a statement instead of mutating it
    pub resample_probability: f64,

    /// Probability of a delta step (vs. resampling) for numeric mutation
    pub delta_mutation_probability: f64,

    /// Largest absolute delta step (1..=1_000_000)
    pub max_delta: u64,

    /// Characters used for fresh strings
    pub string_alphabet: String,

    /// Longest fresh string (0..=10_000)
    pub string_max_length: usize,

    /// Longest dynamic `bytes` value (0..=10_000)
    pub bytes_max_length: usize,

    /// Account index range; negative indices render as literal addresses
    pub min_account_index: i64,
    pub max_account_index: i64,

    /// Fresh integers are capped at 2^bits - 1 in magnitude (1..=256)
    pub magnitude_cap_bits: u32,
}

impl SamplingConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            seed: None,
            max_action_statements: 10,
            max_depth: 5,
            constant_pool_probability: 0.5,
            statement_pool_probability: 0.8,
            resample_probability: 0.2,
            delta_mutation_probability: 0.8,
            max_delta: 10,
            string_alphabet: DEFAULT_STRING_ALPHABET.to_string(),
            string_max_length: 100,
            bytes_max_length: 32,
            min_account_index: -1,
            max_account_index: 5,
            magnitude_cap_bits: 11,
        };
        match preset {
            Preset::Fast => Self {
                max_action_statements: 5,
                max_depth: 3,
                string_max_length: 20,
                ..base
            },
            Preset::Balanced | Preset::Custom => base,
            Preset::Thorough => Self {
                max_action_statements: 20,
                max_depth: 8,
                ..base
            },
        }
    }

    pub fn seed(mut self, v: u64) -> Self {
        self.seed = Some(v);
        self
    }

    pub fn max_action_statements(mut self, v: usize) -> Self {
        self.max_action_statements = v;
        self
    }

    pub fn max_depth(mut self, v: usize) -> Self {
        self.max_depth = v;
        self
    }

    pub fn constant_pool_probability(mut self, v: f64) -> Self {
        self.constant_pool_probability = v;
        self
    }

    pub fn statement_pool_probability(mut self, v: f64) -> Self {
        self.statement_pool_probability = v;
        self
    }

    pub fn resample_probability(mut self, v: f64) -> Self {
        self.resample_probability = v;
        self
    }

    pub fn delta_mutation_probability(mut self, v: f64) -> Self {
        self.delta_mutation_probability = v;
        self
    }

    pub fn max_delta(mut self, v: u64) -> Self {
        self.max_delta = v;
        self
    }

    pub fn string_alphabet(mut self, v: impl Into<String>) -> Self {
        self.string_alphabet = v.into();
        self
    }

    pub fn string_max_length(mut self, v: usize) -> Self {
        self.string_max_length = v;
        self
    }

    pub fn bytes_max_length(mut self, v: usize) -> Self {
        self.bytes_max_length = v;
        self
    }

    pub fn account_index_range(mut self, min: i64, max: i64) -> Self {
        self.min_account_index = min;
        self.max_account_index = max;
        self
    }

    pub fn magnitude_cap_bits(mut self, v: u32) -> Self {
        self.magnitude_cap_bits = v;
        self
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for SamplingConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_action_statements == 0 || self.max_action_statements > 1000 {
            return Err(ConfigError::range_with_hint(
                "max_action_statements",
                self.max_action_statements,
                1,
                1000,
                "A test case needs at least one root statement",
            ));
        }

        if self.max_depth == 0 || self.max_depth > 64 {
            return Err(ConfigError::range_with_hint(
                "max_depth",
                self.max_depth,
                1,
                64,
                "Statement trees need at least one level",
            ));
        }

        ConfigError::check_probability("constant_pool_probability", self.constant_pool_probability)?;
        ConfigError::check_probability("statement_pool_probability", self.statement_pool_probability)?;
        ConfigError::check_probability("resample_probability", self.resample_probability)?;
        ConfigError::check_probability("delta_mutation_probability", self.delta_mutation_probability)?;

        if self.max_delta == 0 || self.max_delta > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "max_delta",
                self.max_delta,
                1,
                1_000_000,
                "Delta steps must move the value",
            ));
        }

        if self.string_alphabet.is_empty() {
            return Err(ConfigError::Custom(
                "string_alphabet must contain at least one character".to_string(),
            ));
        }

        if self.string_max_length > 10_000 {
            return Err(ConfigError::range_with_hint(
                "string_max_length",
                self.string_max_length,
                0,
                10_000,
                "Very long strings only slow the runner down",
            ));
        }

        if self.bytes_max_length > 10_000 {
            return Err(ConfigError::range_with_hint(
                "bytes_max_length",
                self.bytes_max_length,
                0,
                10_000,
                "Very long byte arrays only slow the runner down",
            ));
        }

        if self.min_account_index > self.max_account_index {
            return Err(ConfigError::Conflict {
                issue: format!(
                    "min_account_index {} exceeds max_account_index {}",
                    self.min_account_index, self.max_account_index
                ),
                fix: "Swap the bounds or widen the range".to_string(),
            });
        }

        if self.magnitude_cap_bits == 0 || self.magnitude_cap_bits > 256 {
            return Err(ConfigError::range_with_hint(
                "magnitude_cap_bits",
                self.magnitude_cap_bits,
                1,
                256,
                "Solidity integers are at most 256 bits wide",
            ));
        }

        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "sampling"
    }
}

// ============================================================================
// Parallel
// ============================================================================

/// Project analysis parallelism
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Analyze files with rayon
    pub enabled: bool,

    /// Worker threads (0=auto, 1..=256)
    pub num_threads: usize,
}

impl ParallelConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast | Preset::Balanced | Preset::Thorough | Preset::Custom => Self {
                enabled: true,
                num_threads: 0, // Auto
            },
        }
    }

    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    pub fn num_threads(mut self, v: usize) -> Self {
        self.num_threads = v;
        self
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.num_threads > 256 {
            return Err(ConfigError::range_with_hint(
                "num_threads",
                self.num_threads,
                0,
                256,
                "Number of threads must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "parallel"
    }
}
