use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

/// Which half of the comparison a run produces.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    WithoutMcp,
    WithMcp,
}

impl Mode {
    pub fn mcp_enabled(self) -> bool {
        self == Mode::WithMcp
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Benchmark an AI assistant's shell command style on Windows")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file; defaults to ./shellbench.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run every catalog prompt through the assistant and save the run record.
    Run(RunArgs),
    /// Compare the saved with/without records.
    Compare(CompareArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, value_enum)]
    pub mode: Mode,

    /// Integration label stored on a with-mcp run (default: powershell).
    #[arg(long)]
    pub mcp_server: Option<String>,

    #[arg(long)]
    pub prompts: Option<String>,

    #[arg(long)]
    pub results_dir: Option<String>,

    /// Per-prompt timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(long)]
    pub assistant_bin: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CompareArgs {
    #[arg(long)]
    pub results_dir: Option<String>,

    /// Write the quick summary only, without asking the assistant for a report.
    #[arg(long, default_value_t = false)]
    pub skip_assessment: bool,

    /// Report path (default: <results-dir>/final-report.md, or
    /// <results-dir>/quick-summary.md with --skip-assessment).
    #[arg(long)]
    pub output: Option<PathBuf>,
}
