use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use shellbench_core::catalog::load_catalog;
use shellbench_core::compare::{
    assess, load_pair, quick_summary, write_quick_summary, QUICK_SUMMARY_FILE, REPORT_FILE,
};
use shellbench_core::config::{self, AppConfig};
use shellbench_core::error::CliError;
use shellbench_core::runner::{
    AssistantCommand, FailureSignatures, OutputMode, ProcessAssistant, PromptExecutor,
};
use shellbench_core::style::StyleClassifier;
use shellbench_core::suite::{save_run, RunConfig, SuiteEvent, SuiteRunner, TestRun};

use crate::commands::cli::{Args, CompareArgs, Commands, RunArgs};

pub async fn dispatch(args: Args) -> Result<i32, CliError> {
    let cfg = load_config(args.config.as_deref())?;
    match args.command {
        Commands::Run(run_args) => run(cfg, run_args).await,
        Commands::Compare(compare_args) => compare(cfg, compare_args).await,
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, CliError> {
    let cfg = match path {
        Some(p) => config::load_from_path(p)?,
        None => config::load_default()?,
    };
    Ok(cfg)
}

/// CLI flags win over file and env values.
fn apply_run_overrides(cfg: &mut AppConfig, args: &RunArgs) -> Result<(), CliError> {
    if let Some(p) = &args.prompts {
        cfg.paths.prompts = p.clone();
    }
    if let Some(d) = &args.results_dir {
        cfg.paths.results_dir = d.clone();
    }
    if let Some(t) = args.timeout {
        cfg.assistant.timeout_secs = t;
    }
    if let Some(b) = &args.assistant_bin {
        cfg.assistant.bin = b.clone();
    }
    cfg.validate()?;
    Ok(())
}

async fn run(mut cfg: AppConfig, args: RunArgs) -> Result<i32, CliError> {
    apply_run_overrides(&mut cfg, &args)?;

    let prompts_path = config::expand_path(&cfg.paths.prompts);
    let results_dir = config::expand_path(&cfg.paths.results_dir);
    let catalog = load_catalog(&prompts_path)?;

    let run_cfg = if args.mode.mcp_enabled() {
        RunConfig::with_mcp(args.mcp_server.clone())
    } else {
        RunConfig::without_mcp()
    };

    let assistant = ProcessAssistant::new(
        AssistantCommand::from_config(&cfg.assistant),
        OutputMode::StreamJson,
        Duration::from_millis(cfg.assistant.drain_grace_ms),
    );
    let executor = PromptExecutor::new(
        Arc::new(assistant),
        StyleClassifier::from_config(&cfg.patterns)?,
        FailureSignatures::from_config(&cfg.patterns),
    );

    println!(
        "Running {} prompts {} (assistant: {}, timeout: {}s)",
        catalog.len(),
        mode_label(&run_cfg),
        cfg.assistant.bin,
        cfg.assistant.timeout_secs
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_progress(rx));
    let suite = SuiteRunner::new(
        executor,
        SuiteRunner::work_dir_for(&results_dir),
        Duration::from_secs(cfg.assistant.timeout_secs),
    )
    .with_events(tx);

    let outcome = suite.run_batch(&catalog.prompts, &run_cfg).await;
    // Dropping the runner closes the channel so the printer can finish.
    drop(suite);
    if let Err(e) = printer.await {
        tracing::warn!(error = %e, "progress printer failed");
    }
    let test_run = outcome?;

    let path = save_run(&results_dir, &test_run)?;
    print_run_summary(&test_run, &path);
    Ok(0)
}

async fn compare(cfg: AppConfig, args: CompareArgs) -> Result<i32, CliError> {
    let results_dir = config::expand_path(args.results_dir.as_deref().unwrap_or(&cfg.paths.results_dir));
    let pair = load_pair(&results_dir)?;

    println!("{}", quick_summary(&pair));
    if args.skip_assessment {
        let output = args
            .output
            .unwrap_or_else(|| results_dir.join(QUICK_SUMMARY_FILE));
        let path = write_quick_summary(&pair, &output)?;
        println!("\nQuick summary saved to: {}", path.display());
        return Ok(0);
    }

    let assistant = ProcessAssistant::new(
        AssistantCommand::from_config(&cfg.assistant),
        OutputMode::Text,
        Duration::from_millis(cfg.assistant.drain_grace_ms),
    );
    println!("\nRunning assessment with {}...", cfg.assistant.bin);
    let output = args.output.unwrap_or_else(|| results_dir.join(REPORT_FILE));
    let path = assess(&pair, &assistant, &results_dir, &cfg.report, &output).await?;
    println!("Report saved to: {}", path.display());
    Ok(0)
}

fn mode_label(cfg: &RunConfig) -> String {
    match (cfg.mcp_enabled, cfg.mcp_server.as_deref()) {
        (true, Some(server)) => format!("with MCP ({server})"),
        (true, None) => "with MCP".to_string(),
        (false, _) => "without MCP".to_string(),
    }
}

async fn print_progress(mut rx: mpsc::UnboundedReceiver<SuiteEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            SuiteEvent::RunStarted { .. } => {}
            SuiteEvent::PromptStarted {
                index,
                total,
                prompt_id,
                category,
            } => {
                println!("[{index}/{total}] {category}/{prompt_id}");
            }
            SuiteEvent::PromptFinished {
                success,
                duration,
                first_error,
                ..
            } => {
                let secs = duration.as_secs_f64();
                match (success, first_error) {
                    (true, _) => println!("  ok ({secs:.1}s)"),
                    (false, Some(err)) => println!("  FAIL ({secs:.1}s): {err}"),
                    (false, None) => println!("  FAIL ({secs:.1}s)"),
                }
            }
            SuiteEvent::RunFinished {
                total,
                successful,
                failed,
            } => {
                println!("\nFinished {total} prompts: {successful} passed, {failed} failed");
            }
        }
    }
}

fn print_run_summary(run: &TestRun, path: &Path) {
    println!("Success rate: {:.1}%", run.success_rate());
    println!("Bash-style commands: {}", run.bash_style_count);
    println!("Windows-style commands: {}", run.windows_style_count);
    println!("Results saved to: {}", path.display());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::cli::Mode;

    fn run_args() -> RunArgs {
        RunArgs {
            mode: Mode::WithoutMcp,
            mcp_server: None,
            prompts: Some("p.json".into()),
            results_dir: None,
            timeout: Some(45),
            assistant_bin: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = AppConfig::default();
        apply_run_overrides(&mut cfg, &run_args()).unwrap();
        assert_eq!(cfg.paths.prompts, "p.json");
        assert_eq!(cfg.paths.results_dir, "results");
        assert_eq!(cfg.assistant.timeout_secs, 45);
        assert_eq!(cfg.assistant.bin, "claude");
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let mut cfg = AppConfig::default();
        let mut args = run_args();
        args.timeout = Some(0);
        assert!(matches!(
            apply_run_overrides(&mut cfg, &args),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn mode_labels() {
        assert_eq!(mode_label(&RunConfig::without_mcp()), "without MCP");
        assert_eq!(mode_label(&RunConfig::with_mcp(None)), "with MCP (powershell)");
    }

    #[tokio::test]
    async fn skipped_assessment_still_saves_quick_summary() {
        let tmp = tempfile::tempdir().unwrap();
        save_run(tmp.path(), &TestRun::new(&RunConfig::without_mcp())).unwrap();
        save_run(tmp.path(), &TestRun::new(&RunConfig::with_mcp(None))).unwrap();

        let args = CompareArgs {
            results_dir: Some(tmp.path().display().to_string()),
            skip_assessment: true,
            output: None,
        };
        assert_eq!(compare(AppConfig::default(), args).await.unwrap(), 0);

        let body = std::fs::read_to_string(tmp.path().join(QUICK_SUMMARY_FILE)).unwrap();
        assert!(body.starts_with("# Quick Test Summary"));
        assert!(!tmp.path().join(REPORT_FILE).exists());
    }

    #[tokio::test]
    async fn compare_without_records_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let args = CompareArgs {
            results_dir: Some(tmp.path().display().to_string()),
            skip_assessment: true,
            output: None,
        };
        let err = compare(AppConfig::default(), args).await.unwrap_err();
        assert!(matches!(err, CliError::Compare(_)));
    }

    #[tokio::test]
    async fn missing_catalog_is_fatal() {
        let tmp = std::env::temp_dir().join("shellbench-missing-catalog.json");
        let mut args = run_args();
        args.prompts = Some(tmp.display().to_string());
        let err = run(AppConfig::default(), args).await.unwrap_err();
        assert!(matches!(err, CliError::Catalog(_)));
    }
}
