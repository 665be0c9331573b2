//! Module exclusion by regular expression

use regex::Regex;

use crate::config::ConfigError;

/// Compiled exclusion patterns in two tiers: baseline and additional
#[derive(Debug, Clone, Default)]
pub struct ModuleFilter {
    baseline: Vec<Regex>,
    additional: Vec<Regex>,
}

impl ModuleFilter {
    pub fn new<S: AsRef<str>>(baseline: &[S], additional: &[S]) -> Result<Self, ConfigError> {
        Ok(Self {
            baseline: compile(baseline)?,
            additional: compile(additional)?,
        })
    }

    /// True if any pattern of either tier matches somewhere in `module_name`
    pub fn is_excluded(&self, module_name: &str) -> bool {
        self.baseline
            .iter()
            .chain(&self.additional)
            .any(|pattern| pattern.is_match(module_name))
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern.as_ref()).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.as_ref().to_string(),
                source,
            })
        })
        .collect()
}
