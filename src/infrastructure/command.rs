//! External process execution.
//!
//! Programs are spawned with argument vectors, never through a shell. Paths
//! that end up inside script text go through [`escape_script_string`].

use std::ffi::OsStr;
use std::process::Stdio;

use tokio::process::Command;

use crate::domain::{AppError, Result};

/// Run `program` with `args` and return its trimmed stdout.
///
/// # Errors
/// Returns [`AppError::Tool`] if the program cannot be spawned or exits
/// unsuccessfully; the message is the tool's stderr when it printed any.
pub async fn run_tool<I, S>(program: &str, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    tracing::debug!(program, "Running external tool");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| AppError::tool(program, format!("could not start: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        tracing::debug!(program, %message, "External tool failed");
        return Err(AppError::tool(program, message));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Escape `value` for use inside a double-quoted JavaScript or AppleScript
/// string literal.
#[must_use]
pub fn escape_script_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// `value` as a double-quoted, escaped script string literal.
#[must_use]
pub fn quote_script_string(value: &str) -> String {
    format!("\"{}\"", escape_script_string(value))
}
