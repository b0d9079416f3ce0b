mod loader;
mod types;

pub use loader::{load_catalog, parse_catalog};
pub use types::{Prompt, PromptCatalog};
