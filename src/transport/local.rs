//! SK-010: Local execution transport.

use super::{ExecOutput, ProcessRunner};
use crate::core::types::{ExecOutcome, Invocation};
use std::io::Write;
use std::process::{Command, Stdio};

/// Runs invocations as direct child processes of this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalRunner;

impl ProcessRunner for LocalRunner {
    /// Stdin and stdout are inherited. Stderr is inherited, or attached to
    /// the null device when the invocation discards diagnostics.
    fn run(&self, invocation: &Invocation) -> Result<ExecOutcome, String> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit());
        if invocation.discard_diagnostics {
            cmd.stderr(Stdio::null());
        } else {
            cmd.stderr(Stdio::inherit());
        }
        if let Some(dir) = &invocation.current_dir {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .map_err(|e| format!("failed to spawn {}: {}", invocation.program, e))?;

        Ok(ExecOutcome {
            exit_code: status.code().unwrap_or(-1),
        })
    }
}

/// Execute a shell snippet via `bash`, capturing stdout and stderr.
pub fn exec_local(script: &str) -> Result<ExecOutput, String> {
    let mut child = Command::new("bash")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to spawn bash: {}", e))?;

    if let Some(ref mut stdin) = child.stdin {
        stdin
            .write_all(script.as_bytes())
            .map_err(|e| format!("stdin write error: {}", e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("wait error: {}", e))?;

    Ok(ExecOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Execute a shell snippet via `bash -c` with all streams inherited.
pub fn exec_local_passthrough(script: &str) -> Result<i32, String> {
    let status = Command::new("bash")
        .arg("-c")
        .arg(script)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| format!("failed to spawn bash: {}", e))?;
    Ok(status.code().unwrap_or(-1))
}
