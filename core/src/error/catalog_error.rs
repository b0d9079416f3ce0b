// core/src/error/catalog_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("prompt catalog not found: {0}")]
    NotFound(String),

    #[error("failed to read prompt catalog: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid prompt catalog json")]
    InvalidJson(#[source] serde_json::Error),
}
