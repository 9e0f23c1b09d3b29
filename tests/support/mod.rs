#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use sdef_reader::{DictionaryService, DirectoryProvider};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Service over the checked-in `.sdef` fixtures.
pub fn fixture_service() -> DictionaryService {
    DictionaryService::new(Box::new(DirectoryProvider::new(fixtures_dir())))
}

/// The built CLI with the fixture directory preselected.
pub fn reader_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sdef-reader"));
    cmd.arg("--sdef-dir")
        .arg(fixtures_dir())
        .env_remove("RUST_LOG")
        .env_remove("SDEF_READER_DIR")
        .env_remove("SDEF_READER_TIMEOUT_SECS");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run `cmd` with `input` on stdin and collect its output, whatever the exit
/// status.
pub fn run_with_stdin(mut cmd: Command, input: &str) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn command: {:?}", cmd))?;
    child
        .stdin
        .take()
        .context("child stdin unavailable")?
        .write_all(input.as_bytes())
        .context("failed to write child stdin")?;
    child.wait_with_output().context("failed to wait for child")
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}
