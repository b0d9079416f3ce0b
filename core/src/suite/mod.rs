mod events;
mod run;
pub mod store;
mod types;

pub use events::{SuiteEvent, ERROR_SNIPPET_CHARS};
pub use run::{SuiteRunner, WORKDIR_NAME};
pub use store::{load_run, record_path, save_run};
pub use types::{RunConfig, TestRun, DEFAULT_MCP_SERVER};
