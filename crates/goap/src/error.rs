//! Planner errors.
//!
//! "No plan" is not an error: a search that finds no goal-satisfying transition returns
//! `Ok(None)`. Errors are reserved for faults that stop the search itself.

use thiserror::Error;

use crate::clone::CloneError;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to clone planning state: {0}")]
    Clone(#[from] CloneError),

    #[error("expansion budget of {limit} nodes exhausted before the search completed")]
    ExpansionBudgetExhausted { limit: usize },
}

/// Errors loading a [`PlannerConfig`](crate::PlannerConfig).
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse planner config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
