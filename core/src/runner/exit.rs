/// Maps a process exit status to a single integer code.
///
/// On unix a child killed by signal N reports `128 + N`, like a shell would.
pub fn normalize_exit(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    signal_code(status).unwrap_or(1)
}

#[cfg(unix)]
fn signal_code(status: std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|sig| 128 + sig)
}

#[cfg(not(unix))]
fn signal_code(_status: std::process::ExitStatus) -> Option<i32> {
    None
}
