pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod runner;
pub mod style;
pub mod suite;
pub mod tool_event;
