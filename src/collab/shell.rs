//! SK-021: Shell commands, captured or passed through.

use crate::core::error::SakeError;
use crate::transport::local;

/// Run a bash snippet and return its trimmed stdout.
pub fn run(bash: &str) -> Result<String, SakeError> {
    tracing::debug!(command = bash, "running");
    let out = local::exec_local(bash).map_err(|e| SakeError::collaborator(bash, e))?;
    if !out.success() {
        let reason = match out.stderr.trim() {
            "" => format!("exit code {}", out.exit_code),
            stderr => format!("exit code {}: {}", out.exit_code, stderr),
        };
        return Err(SakeError::collaborator(bash, reason));
    }
    Ok(out.stdout.trim_end().to_string())
}

/// Run a bash snippet with its output going straight to the terminal.
pub fn run_and_print(bash: &str) -> Result<(), SakeError> {
    tracing::debug!(command = bash, "running");
    let code = local::exec_local_passthrough(bash).map_err(|e| SakeError::collaborator(bash, e))?;
    if code != 0 {
        return Err(SakeError::collaborator(bash, format!("exit code {}", code)));
    }
    Ok(())
}
