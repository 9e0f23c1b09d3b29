// Smoke tests for the sdef-reader binary against the fixture directory.
mod support;

use anyhow::Result;
use serde_json::Value;
use support::{reader_command, run_command, run_with_stdin, stdout_text};

#[test]
fn subcommands_print_rendered_text() -> Result<()> {
    let mut cmd = reader_command();
    cmd.args(["suites", "TextEdit"]);
    let output = run_command(cmd)?;
    let text = stdout_text(&output);
    assert!(text.starts_with("Dictionary: TextEdit Terminology\n"));
    assert!(text.ends_with("0 commands · 2 classes · 0 enums\n"));

    let mut cmd = reader_command();
    cmd.args(["enum", "TextEdit", "SAVE OPTIONS"]);
    let text = stdout_text(&run_command(cmd)?);
    assert!(text.starts_with("ENUM: save options  [Standard Suite]\n  yes"));

    let mut cmd = reader_command();
    cmd.args(["search", "TextEdit", "xyzzy"]);
    assert_eq!(
        stdout_text(&run_command(cmd)?),
        "No results for 'xyzzy' in TextEdit's dictionary.\n"
    );
    Ok(())
}

#[test]
fn flags_are_accepted_after_the_subcommand() -> Result<()> {
    let mut cmd = reader_command();
    cmd.args(["apps", "--timeout", "5"]);
    assert_eq!(
        stdout_text(&run_command(cmd)?),
        "Scriptable apps:\n  Broken\n  TextEdit\n"
    );
    Ok(())
}

#[test]
fn not_found_is_a_successful_answer() -> Result<()> {
    let mut cmd = reader_command();
    cmd.args(["command", "TextEdit", "quit"]);
    assert_eq!(
        stdout_text(&run_command(cmd)?),
        "Command 'quit' not found.\nAvailable: close, count, set\n"
    );
    Ok(())
}

#[test]
fn export_emits_model_json() -> Result<()> {
    let mut cmd = reader_command();
    cmd.args(["export", "TextEdit"]);
    let json: Value = serde_json::from_slice(&run_command(cmd)?.stdout)?;
    assert_eq!(json["title"], "TextEdit Terminology");
    assert_eq!(json["suites"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["suites"][2]["classes"][1]["is_extension"], true);
    Ok(())
}

#[test]
fn load_failures_exit_nonzero() -> Result<()> {
    let mut cmd = reader_command();
    cmd.args(["suites", "Pages"]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("App 'Pages' not found."), "stderr: {stderr}");

    let mut cmd = reader_command();
    cmd.args(["suites", "Broken"]);
    let output = cmd.output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Malformed SDEF XML"));
    Ok(())
}

#[test]
fn invalid_timeout_is_rejected() -> Result<()> {
    let mut cmd = reader_command();
    cmd.args(["--timeout", "0", "apps"]);
    let output = cmd.output()?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn serve_answers_line_delimited_requests() -> Result<()> {
    let mut cmd = reader_command();
    cmd.arg("serve");
    let input = concat!(
        "{\"id\": 1, \"op\": \"overview\", \"app\": \"TextEdit\"}\n",
        "{\"id\": 2, \"op\": \"class\", \"app\": \"TextEdit\", \"name\": \"rich text\"}\n",
        "garbage\n",
        "\n",
        "{\"id\": 3, \"op\": \"search\", \"app\": \"Pages\", \"query\": \"x\"}\n",
    );
    let output = run_with_stdin(cmd, input)?;
    assert!(output.status.success());

    let responses: Vec<Value> = stdout_text(&output)
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(responses.len(), 4);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["ok"], true);
    assert!(
        responses[0]["text"]
            .as_str()
            .is_some_and(|text| text.starts_with("Dictionary: TextEdit Terminology"))
    );

    assert_eq!(responses[1]["id"], 2);
    assert!(
        responses[1]["text"]
            .as_str()
            .is_some_and(|text| text.contains("Elements: paragraph, word"))
    );

    assert_eq!(responses[2]["ok"], false);
    assert_eq!(responses[3]["id"], 3);
    assert_eq!(responses[3]["ok"], false);
    Ok(())
}
