// core/src/error/compare_error.rs
use thiserror::Error;

use super::{RunnerError, StoreError};

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("missing {label} results: {path}")]
    MissingRun { label: &'static str, path: String },

    #[error("run record error: {0}")]
    Store(#[from] StoreError),

    #[error("assessment failed: {0}")]
    Assessment(#[from] RunnerError),

    #[error("failed to encode run summary")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write report: {path}")]
    WriteReport {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
