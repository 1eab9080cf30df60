//! SK-010: Process transport: the runner seam and local execution.

pub mod local;

use crate::core::types::{ExecOutcome, Invocation};

/// Captured output from a collaborator shell command.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs an invocation to completion, blocking the caller.
///
/// `Err` means the process could not be launched at all.
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExecOutcome, String>;
}

impl<F> ProcessRunner for F
where
    F: Fn(&Invocation) -> Result<ExecOutcome, String>,
{
    fn run(&self, invocation: &Invocation) -> Result<ExecOutcome, String> {
        self(invocation)
    }
}

/// Render an invocation as a copy-pasteable shell command line.
pub fn render_command(invocation: &Invocation) -> String {
    let mut parts = Vec::with_capacity(invocation.args.len() + 1);
    parts.push(shell_quote(&invocation.program));
    parts.extend(invocation.args.iter().map(|a| shell_quote(a)));
    let mut line = parts.join(" ");
    if invocation.discard_diagnostics {
        line.push_str(" 2>/dev/null");
    }
    line
}

/// Single-quote a token unless it only holds shell-safe characters.
pub fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}
