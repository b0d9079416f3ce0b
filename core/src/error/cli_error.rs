// core/src/error/cli_error.rs
use thiserror::Error;

use super::{CatalogError, CompareError, ConfigError, RunnerError, StoreError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Runner(#[from] RunnerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Compare(#[from] CompareError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
