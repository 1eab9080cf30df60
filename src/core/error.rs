//! SK-007: Error taxonomy for the execution engine and collaborators.
//!
//! Every failure is terminal for the run. Callers branch on [`ErrorKind`]
//! instead of parsing messages.

use std::fmt;

/// Closed set of failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The script file is absent from the working directory.
    ScriptNotFound,
    /// No candidate location holds the capability library.
    LibraryNotFound,
    /// The toolchain exited non-zero or could not be spawned.
    ExecutionFailed,
    /// An external collaborator command (git, curl, audit) failed.
    CollaboratorFailed,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ScriptNotFound => "script not found",
            ErrorKind::LibraryNotFound => "library not found",
            ErrorKind::ExecutionFailed => "execution failed",
            ErrorKind::CollaboratorFailed => "collaborator failed",
        };
        write!(f, "{}", s)
    }
}

/// A failure with its kind and a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SakeError {
    kind: ErrorKind,
    detail: String,
}

impl SakeError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn script_not_found(script_name: &str, dir: &std::path::Path) -> Self {
        Self::new(
            ErrorKind::ScriptNotFound,
            format!("couldn't find {} in directory {}", script_name, dir.display()),
        )
    }

    pub fn library_not_found(file_name: &str, searched: &[std::path::PathBuf]) -> Self {
        let dirs: Vec<String> = searched.iter().map(|p| p.display().to_string()).collect();
        Self::new(
            ErrorKind::LibraryNotFound,
            format!(
                "couldn't find {} to link against (searched: {}). Build the project first.",
                file_name,
                dirs.join(", ")
            ),
        )
    }

    /// The uniform execution failure. Toolchain output is never folded in.
    pub fn execution_failed(script_name: &str) -> Self {
        Self::new(
            ErrorKind::ExecutionFailed,
            format!(
                "something went wrong running {}. Use --verbose to get more details about the problem.",
                script_name
            ),
        )
    }

    pub fn collaborator(command: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::CollaboratorFailed,
            format!("`{}` failed: {}", command, reason),
        )
    }
}

impl fmt::Display for SakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl std::error::Error for SakeError {}

impl From<SakeError> for String {
    fn from(e: SakeError) -> Self {
        e.to_string()
    }
}
