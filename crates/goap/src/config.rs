//! Planner configuration.

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use crate::error::ConfigError;

/// Search limits.
///
/// The default is unbounded: every no-repeat ordering of applicable actions is explored, which
/// is what makes the search complete. A budget trades that completeness for a hard ceiling on
/// work; exhausting it is reported as an error, never as "no plan".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Maximum number of child nodes built during one search.
    pub max_expansions: Option<usize>,
}

impl PlannerConfig {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Parse a config from YAML, e.g. `max_expansions: 4096`.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        assert_eq!(PlannerConfig::default().max_expansions, None);
        assert_eq!(PlannerConfig::unbounded(), PlannerConfig::default());
    }

    #[test]
    fn builder_sets_budget() {
        let config = PlannerConfig::unbounded().with_max_expansions(16);
        assert_eq!(config.max_expansions, Some(16));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn yaml_fields_are_optional() {
        assert_eq!(PlannerConfig::from_yaml_str("").unwrap(), PlannerConfig::default());
        assert_eq!(PlannerConfig::from_yaml_str("{}").unwrap(), PlannerConfig::default());
        assert_eq!(
            PlannerConfig::from_yaml_str("max_expansions: 128").unwrap(),
            PlannerConfig::default().with_max_expansions(128)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn yaml_rejects_wrong_types() {
        assert!(matches!(
            PlannerConfig::from_yaml_str("max_expansions: lots"),
            Err(ConfigError::Parse(_))
        ));
    }
}
