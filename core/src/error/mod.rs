mod catalog_error;
mod cli_error;
mod compare_error;
mod config_error;
mod runner_error;
mod store_error;

pub use catalog_error::CatalogError;
pub use cli_error::CliError;
pub use compare_error::CompareError;
pub use config_error::ConfigError;
pub use runner_error::RunnerError;
pub use store_error::StoreError;
