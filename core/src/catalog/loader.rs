use std::collections::HashSet;
use std::path::Path;

use super::types::PromptCatalog;
use crate::error::CatalogError;

pub fn load_catalog(path: &Path) -> Result<PromptCatalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = parse_catalog(&raw)?;
    tracing::info!(
        target: "shellbench.catalog",
        path = %path.display(),
        prompts = catalog.len(),
        "prompt catalog loaded"
    );
    Ok(catalog)
}

pub fn parse_catalog(raw: &str) -> Result<PromptCatalog, CatalogError> {
    let catalog: PromptCatalog = serde_json::from_str(raw).map_err(CatalogError::InvalidJson)?;

    let mut seen = HashSet::new();
    for p in &catalog.prompts {
        if !seen.insert(p.id.as_str()) {
            tracing::warn!(target: "shellbench.catalog", id = %p.id, "duplicate prompt id");
        }
    }

    Ok(catalog)
}
