//! Section validation

use tracing::debug;

use super::error::ConfigResult;

/// A configuration section that rejects out-of-range values
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;

    /// Section key, as spelled in YAML overrides
    fn config_name(&self) -> &'static str;
}

/// Validate a section override if one was given
///
/// Absent sections fall back to preset values, which are valid as shipped.
pub fn validate_override<T: Validatable>(section: &Option<T>) -> ConfigResult<()> {
    let Some(section) = section else {
        return Ok(());
    };
    section.validate()?;
    debug!(section = section.config_name(), "validated configuration override");
    Ok(())
}
