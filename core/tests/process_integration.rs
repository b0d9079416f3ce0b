//! Real subprocess runs against small shell scripts standing in for the assistant.
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use shellbench_core::catalog::Prompt;
use shellbench_core::runner::{
    AssistantCommand, FailureSignatures, OutputMode, ProcessAssistant, PromptExecutor,
};
use shellbench_core::style::StyleClassifier;

fn prompt(text: &str) -> Prompt {
    Prompt {
        id: "p".into(),
        category: "test".into(),
        text: text.into(),
        triggers: None,
    }
}

fn executor(bin: &Path) -> PromptExecutor {
    let assistant = ProcessAssistant::new(
        AssistantCommand::new(bin.display().to_string()),
        OutputMode::StreamJson,
        Duration::from_millis(300),
    );
    PromptExecutor::new(
        Arc::new(assistant),
        StyleClassifier::default(),
        FailureSignatures::default(),
    )
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[tokio::test]
async fn stream_from_child_is_extracted() {
    let tmp = tempfile::tempdir().unwrap();
    let script = write_script(
        tmp.path(),
        "assistant.sh",
        r#"echo '{"type":"tool_use","name":"Bash","input":{"command":"ls -la /etc"}}'
echo 'not json at all'
echo '{"type":"tool_result","content":"passwd hosts"}'"#,
    );

    let r = executor(&script)
        .execute(&prompt("list /etc"), tmp.path(), Duration::from_secs(10))
        .await;

    assert!(r.execution_success, "errors: {:?}", r.errors);
    assert_eq!(r.exit_code, 0);
    assert_eq!(r.commands_used, vec!["ls -la /etc".to_string()]);
    assert_eq!(r.tool_calls[0].tool_result.as_deref(), Some("passwd hosts"));
    assert!(r.used_bash_style);
    assert!(!r.used_windows_style);
}

#[cfg(unix)]
#[tokio::test]
async fn child_sees_prompt_and_work_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let work = tmp.path().join("work");
    std::fs::create_dir_all(&work).unwrap();
    let script = write_script(
        tmp.path(),
        "echo_args.sh",
        r#"printf '%s\n' "$@" > args.txt"#,
    );

    let r = executor(&script)
        .execute(&prompt("say hi"), &work, Duration::from_secs(10))
        .await;

    assert!(r.execution_success, "errors: {:?}", r.errors);
    let args = std::fs::read_to_string(work.join("args.txt")).unwrap();
    assert_eq!(
        args.lines().collect::<Vec<_>>(),
        vec![
            "-p",
            "say hi",
            "--output-format",
            "stream-json",
            "--dangerously-skip-permissions"
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn stderr_and_exit_code_fail_the_prompt() {
    let tmp = tempfile::tempdir().unwrap();
    let script = write_script(
        tmp.path(),
        "broken.sh",
        "echo 'sh: tree: command not found' >&2\nexit 127",
    );

    let r = executor(&script)
        .execute(&prompt("tree"), tmp.path(), Duration::from_secs(10))
        .await;

    assert!(!r.execution_success);
    assert_eq!(r.exit_code, 127);
    assert_eq!(r.errors, vec!["stderr: sh: tree: command not found".to_string()]);
}

#[cfg(unix)]
#[tokio::test]
async fn hung_child_times_out_near_the_deadline() {
    let tmp = tempfile::tempdir().unwrap();
    let script = write_script(
        tmp.path(),
        "hang.sh",
        r#"echo '{"type":"tool_use","name":"Bash","input":{"command":"Get-Process"}}'
exec sleep 30"#,
    );

    let started = std::time::Instant::now();
    let r = executor(&script)
        .execute(&prompt("hang"), tmp.path(), Duration::from_secs(1))
        .await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(!r.execution_success);
    assert_eq!(r.errors, vec!["Timeout after 1 seconds".to_string()]);
    assert!(
        r.duration_seconds >= 0.9 && r.duration_seconds < 3.0,
        "duration {}",
        r.duration_seconds
    );
    assert!(r.stdout.contains("Get-Process"));
    assert!(!r.used_windows_style);
}

#[cfg(unix)]
#[tokio::test]
async fn background_process_holding_pipes_does_not_stall_the_prompt() {
    let tmp = tempfile::tempdir().unwrap();
    let script = write_script(
        tmp.path(),
        "detach.sh",
        r#"echo '{"type":"tool_use","name":"Bash","input":{"command":"Get-ChildItem"}}'
sleep 8 &
exit 0"#,
    );

    let started = std::time::Instant::now();
    let r = executor(&script)
        .execute(&prompt("detach"), tmp.path(), Duration::from_secs(1))
        .await;

    assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
    assert!(r.duration_seconds < 3.0, "duration {}", r.duration_seconds);
    assert!(r.execution_success, "errors: {:?}", r.errors);
    assert_eq!(r.exit_code, 0);
    assert_eq!(r.commands_used, vec!["Get-ChildItem".to_string()]);
    assert!(r.used_windows_style);
}

#[cfg(unix)]
#[tokio::test]
async fn timeout_with_background_process_is_still_bounded() {
    let tmp = tempfile::tempdir().unwrap();
    let script = write_script(
        tmp.path(),
        "detach_hang.sh",
        "sleep 8 &\nexec sleep 30",
    );

    let started = std::time::Instant::now();
    let r = executor(&script)
        .execute(&prompt("detach and hang"), tmp.path(), Duration::from_secs(1))
        .await;

    assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
    assert!(!r.execution_success);
    assert_eq!(r.errors, vec!["Timeout after 1 seconds".to_string()]);
}

#[tokio::test]
async fn missing_binary_is_a_failed_result() {
    let tmp = tempfile::tempdir().unwrap();
    let bin = tmp.path().join("no-such-assistant");

    let r = executor(&bin)
        .execute(&prompt("anything"), tmp.path(), Duration::from_secs(5))
        .await;

    assert!(!r.execution_success);
    assert_eq!(r.exit_code, -1);
    assert_eq!(
        r.errors,
        vec![format!("Assistant binary not found: {}", bin.display())]
    );
}
