// core/src/error/store_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write run record: {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read run record: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("run record encode/decode error: {path}")]
    Serde {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "run counters out of sync: successful={successful} failed={failed} total={total} results={results}"
    )]
    CountMismatch {
        successful: usize,
        failed: usize,
        total: usize,
        results: usize,
    },
}
