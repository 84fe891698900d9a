//! Top-level configuration with preset defaults and section overrides

use super::{
    error::{ConfigError, ConfigResult},
    io::{ConfigExportV1, ConfigOverrides},
    preset::Preset,
    section_configs::*,
    validation::validate_override,
};

/// Configuration builder
#[derive(Debug, Clone)]
pub struct SolsynthConfig {
    /// Base preset
    pub(crate) preset: Preset,

    /// Section overrides; `None` falls back to the preset
    pub(crate) control_flow: Option<ControlFlowConfig>,
    pub(crate) constant_pool: Option<ConstantPoolConfig>,
    pub(crate) sampling: Option<SamplingConfig>,
    pub(crate) parallel: Option<ParallelConfig>,
}

impl SolsynthConfig {
    /// Create from preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            control_flow: None,
            constant_pool: None,
            sampling: None,
            parallel: None,
        }
    }

    /// Override control-flow construction
    pub fn control_flow<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ControlFlowConfig) -> ControlFlowConfig,
    {
        let base = self
            .control_flow
            .take()
            .unwrap_or_else(|| ControlFlowConfig::from_preset(self.preset));
        self.control_flow = Some(f(base));
        self
    }

    /// Override constant pool handling
    pub fn constant_pool<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ConstantPoolConfig) -> ConstantPoolConfig,
    {
        let base = self
            .constant_pool
            .take()
            .unwrap_or_else(|| ConstantPoolConfig::from_preset(self.preset));
        self.constant_pool = Some(f(base));
        self
    }

    /// Override sampling
    pub fn sampling<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SamplingConfig) -> SamplingConfig,
    {
        let base = self
            .sampling
            .take()
            .unwrap_or_else(|| SamplingConfig::from_preset(self.preset));
        self.sampling = Some(f(base));
        self
    }

    /// Override parallelism
    pub fn parallel<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ParallelConfig) -> ParallelConfig,
    {
        let base = self
            .parallel
            .take()
            .unwrap_or_else(|| ParallelConfig::from_preset(self.preset));
        self.parallel = Some(f(base));
        self
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    /// Build and validate
    pub fn build(self) -> ConfigResult<ValidatedConfig> {
        validate_override(&self.control_flow)?;
        validate_override(&self.constant_pool)?;
        validate_override(&self.sampling)?;
        validate_override(&self.parallel)?;

        let parallel = self.effective_parallel();
        if !parallel.enabled && parallel.num_threads > 1 {
            return Err(ConfigError::Conflict {
                issue: format!(
                    "parallel analysis disabled but num_threads = {}",
                    parallel.num_threads
                ),
                fix: "Enable parallel analysis or set num_threads to 0".to_string(),
            });
        }

        Ok(ValidatedConfig(self))
    }

    fn effective_parallel(&self) -> ParallelConfig {
        self.parallel
            .clone()
            .unwrap_or_else(|| ParallelConfig::from_preset(self.preset))
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: &str) -> ConfigResult<ValidatedConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse YAML text (v1 schema)
    pub fn from_yaml_str(content: &str) -> ConfigResult<ValidatedConfig> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        match export.version {
            None => return Err(ConfigError::MissingVersion),
            Some(1) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![1],
                })
            }
        }

        let preset = Preset::from_str(&export.preset)
            .map_err(|_| ConfigError::UnknownPreset(export.preset.clone()))?;

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            config.control_flow = overrides.control_flow;
            config.constant_pool = overrides.constant_pool;
            config.sampling = overrides.sampling;
            config.parallel = overrides.parallel;
        }

        config.build()
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                control_flow: self.control_flow.clone(),
                constant_pool: self.constant_pool.clone(),
                sampling: self.sampling.clone(),
                parallel: self.parallel.clone(),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

impl Default for SolsynthConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

/// Validated configuration (immutable, safe to use)
#[derive(Debug, Clone)]
pub struct ValidatedConfig(SolsynthConfig);

impl ValidatedConfig {
    pub fn into_inner(self) -> SolsynthConfig {
        self.0
    }

    pub fn as_inner(&self) -> &SolsynthConfig {
        &self.0
    }

    pub fn preset(&self) -> Preset {
        self.0.preset
    }

    pub fn control_flow(&self) -> ControlFlowConfig {
        self.0
            .control_flow
            .clone()
            .unwrap_or_else(|| ControlFlowConfig::from_preset(self.0.preset))
    }

    pub fn constant_pool(&self) -> ConstantPoolConfig {
        self.0
            .constant_pool
            .clone()
            .unwrap_or_else(|| ConstantPoolConfig::from_preset(self.0.preset))
    }

    pub fn sampling(&self) -> SamplingConfig {
        self.0
            .sampling
            .clone()
            .unwrap_or_else(|| SamplingConfig::from_preset(self.0.preset))
    }

    pub fn parallel(&self) -> ParallelConfig {
        self.0.effective_parallel()
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        self.0.to_yaml()
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let sampling = self.sampling();
        format!(
            "{} [forgiving={}, constants={}, max_actions={}, max_depth={}, parallel={}]",
            self.0.preset,
            self.control_flow().syntax_forgiving,
            self.constant_pool().enabled,
            sampling.max_action_statements,
            sampling.max_depth,
            self.parallel().enabled
        )
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        ValidatedConfig(SolsynthConfig::default())
    }
}
