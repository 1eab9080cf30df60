//! SK-008: Script execution engine.
//!
//! One run walks the stages in order and stops at the first failure:
//! locate script → resolve library → build invocation → execute.
//! Nothing is retried and nothing is carried over between runs.

use super::error::SakeError;
use super::invocation;
use super::library::{LibraryLocator, LibraryResolver};
use super::paths::{self, FsProbe, PathProbe};
use super::script;
use super::types::{Invocation, SakeConfig, ToolchainConfig};
use crate::transport::local::LocalRunner;
use crate::transport::ProcessRunner;
use std::fmt;
use std::path::{Path, PathBuf};

/// Progress of a single run, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ScriptLocated,
    LibraryResolved,
    InvocationBuilt,
    Executed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Idle => "idle",
            Stage::ScriptLocated => "script-located",
            Stage::LibraryResolved => "library-resolved",
            Stage::InvocationBuilt => "invocation-built",
            Stage::Executed => "executed",
        };
        write!(f, "{}", s)
    }
}

/// Everything a run resolved before executing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub script: PathBuf,
    pub library: PathBuf,
    pub invocation: Invocation,
}

/// Engine wired to its three collaborators.
pub struct Engine<'a> {
    script_name: &'a str,
    library_name: &'a str,
    library_file: String,
    toolchain: &'a ToolchainConfig,
    probe: &'a dyn PathProbe,
    locator: &'a dyn LibraryLocator,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Engine<'a> {
    pub fn new(
        config: &'a SakeConfig,
        probe: &'a dyn PathProbe,
        locator: &'a dyn LibraryLocator,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            script_name: &config.script,
            library_name: &config.library.name,
            library_file: config.library.file_name(),
            toolchain: &config.toolchain,
            probe,
            locator,
            runner,
        }
    }

    /// Locate, resolve and build without executing.
    pub fn plan(
        &self,
        working_dir: &Path,
        forwarded: &[String],
        verbose: bool,
    ) -> Result<RunPlan, SakeError> {
        tracing::debug!(stage = %Stage::Idle, dir = %working_dir.display(), "starting run");

        let script = script::script_path(working_dir, self.script_name, self.probe)
            .ok_or_else(|| SakeError::script_not_found(self.script_name, working_dir))?;
        tracing::debug!(stage = %Stage::ScriptLocated, script = %script.display());

        let library = self.locator.library_path().ok_or_else(|| {
            SakeError::library_not_found(&self.library_file, &self.locator.searched_dirs())
        })?;
        let library = paths::normalize(&library);
        tracing::debug!(stage = %Stage::LibraryResolved, library = %library.display());

        let mut inv = invocation::build_invocation(
            self.toolchain,
            self.library_name,
            &library,
            &script,
            forwarded,
            verbose,
        );
        inv.current_dir = Some(paths::normalize(working_dir));
        tracing::debug!(stage = %Stage::InvocationBuilt, command = %inv);
        Ok(RunPlan {
            script,
            library,
            invocation: inv,
        })
    }

    /// Run the script. Any non-zero exit or launch failure becomes the one
    /// uniform `ExecutionFailed` error.
    pub fn execute(
        &self,
        working_dir: &Path,
        forwarded: &[String],
        verbose: bool,
    ) -> Result<(), SakeError> {
        let plan = self.plan(working_dir, forwarded, verbose)?;

        match self.runner.run(&plan.invocation) {
            Ok(outcome) if outcome.success() => {
                tracing::debug!(stage = %Stage::Executed, "script succeeded");
                Ok(())
            }
            Ok(outcome) => {
                tracing::debug!(
                    stage = %Stage::Executed,
                    exit_code = outcome.exit_code,
                    "script failed"
                );
                Err(SakeError::execution_failed(self.script_name))
            }
            Err(e) => {
                tracing::debug!(stage = %Stage::Executed, error = %e, "toolchain did not start");
                Err(SakeError::execution_failed(self.script_name))
            }
        }
    }
}

/// Run the script in `working_dir` against the real filesystem and processes.
pub fn execute(
    config: &SakeConfig,
    working_dir: &Path,
    forwarded: &[String],
    verbose: bool,
) -> Result<(), SakeError> {
    let resolver = LibraryResolver::new(working_dir, &config.library);
    Engine::new(config, &FsProbe, &resolver, &LocalRunner).execute(
        working_dir,
        forwarded,
        verbose,
    )
}

/// Resolve everything `execute` would run, without running it.
pub fn plan(
    config: &SakeConfig,
    working_dir: &Path,
    forwarded: &[String],
    verbose: bool,
) -> Result<RunPlan, SakeError> {
    let resolver = LibraryResolver::new(working_dir, &config.library);
    Engine::new(config, &FsProbe, &resolver, &LocalRunner).plan(working_dir, forwarded, verbose)
}
