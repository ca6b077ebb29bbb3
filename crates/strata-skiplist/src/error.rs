use strata_config::ConfigError;
use thiserror::Error;

/// Errors reported by [`SkipList`](crate::SkipList) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("value not found")]
    NotFound,
}
