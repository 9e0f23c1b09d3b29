//! Process helpers shared by the providers.
//!
//! Centralizes executable detection, PATH resolution, and bounded execution of
//! external tools so a hung `mdfind` or `sdef` cannot stall a request.

use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Returns true when a file exists and has any execute bit set.
pub fn helper_is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(meta) = std::fs::metadata(path) {
            return meta.permissions().mode() & 0o111 != 0;
        }
        false
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Find an executable by name somewhere on PATH.
///
/// Names containing a path separator are checked as given.
pub fn find_on_path(name: &str) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.components().count() > 1 {
        return helper_is_executable(direct).then(|| direct.to_path_buf());
    }
    let paths = env::var_os("PATH")?;
    for dir in env::split_paths(&paths) {
        let candidate = dir.join(name);
        if helper_is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[derive(Debug)]
/// Captured result of a command that exited on its own.
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

#[derive(Debug)]
pub enum CommandOutcome {
    Completed(CapturedOutput),
    /// The deadline passed; the child was killed and reaped.
    TimedOut,
}

/// Run `command` to completion or until `timeout` elapses.
///
/// stdout and stderr are drained on background threads so large outputs (a
/// full scripting dictionary can be megabytes) never block the child on a
/// full pipe.
pub fn run_with_timeout(mut command: Command, timeout: Duration) -> io::Result<CommandOutcome> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let Some(status) = wait_until(&mut child, Instant::now() + timeout)? else {
        // Reaping closes the pipes, which lets the drain threads finish.
        let _ = child.kill();
        let _ = child.wait();
        let _ = join_drain(stdout);
        let _ = join_drain(stderr);
        return Ok(CommandOutcome::TimedOut);
    };

    Ok(CommandOutcome::Completed(CapturedOutput {
        status,
        stdout: join_drain(stdout)?,
        stderr: join_drain(stderr)?,
    }))
}

fn wait_until(child: &mut Child, deadline: Instant) -> io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<io::Result<Vec<u8>>>> {
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_drain(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
    match handle {
        None => Ok(Vec::new()),
        Some(handle) => handle
            .join()
            .map_err(|_| io::Error::other("output reader thread panicked"))?,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn captures_output_and_status() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("printf out; printf err >&2; exit 3");
        let outcome = run_with_timeout(command, Duration::from_secs(10)).expect("spawn sh");
        let CommandOutcome::Completed(output) = outcome else {
            panic!("sh should finish well before the deadline");
        };
        assert_eq!(output.status.code(), Some(3));
        assert_eq!(output.stdout, b"out");
        assert_eq!(output.stderr, b"err");
    }

    #[test]
    fn kills_commands_past_deadline() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("exec sleep 30");
        let started = Instant::now();
        let outcome = run_with_timeout(command, Duration::from_millis(200)).expect("spawn sh");
        assert!(matches!(outcome, CommandOutcome::TimedOut));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn path_lookup_finds_shell() {
        assert!(find_on_path("sh").is_some());
        assert!(find_on_path("definitely-not-a-real-helper-binary").is_none());
    }
}
