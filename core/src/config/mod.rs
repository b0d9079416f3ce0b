pub mod load;
mod types;

pub use load::{expand_path, load_default, load_from_path, CONFIG_FILE_NAME};
pub use types::*;
