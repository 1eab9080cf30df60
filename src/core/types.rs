//! SK-001: Configuration schema and per-run value types.
//!
//! `sake.yaml` is optional. Every field has a default matching the Swift
//! toolchain layout, so a bare project directory with a `Sakefile.swift`
//! works without any configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Environment variable that overrides `library.override_dir`.
pub const LIBRARIES_PATH_ENV: &str = "SAKE_LIBRARIES_PATH";

/// Name of the optional configuration file in the working directory.
pub const CONFIG_FILE_NAME: &str = "sake.yaml";

// ============================================================================
// Top-level sake.yaml
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SakeConfig {
    /// Script file name, looked up directly in the working directory
    #[serde(default = "default_script")]
    pub script: String,

    /// Toolchain used to compile-and-run the script
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Capability library lookup
    #[serde(default)]
    pub library: LibraryConfig,
}

impl Default for SakeConfig {
    fn default() -> Self {
        Self {
            script: default_script(),
            toolchain: ToolchainConfig::default(),
            library: LibraryConfig::default(),
        }
    }
}

fn default_script() -> String {
    "Sakefile.swift".to_string()
}

// ============================================================================
// Toolchain
// ============================================================================

/// How the compile-and-run command line is spelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Executable name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Operating-mode flag (immediate mode)
    #[serde(default = "default_mode_flag")]
    pub mode_flag: Option<String>,

    /// Warning-suppression flag
    #[serde(default = "default_suppress_warnings_flag")]
    pub suppress_warnings_flag: Option<String>,

    /// Flags each followed by the library directory (library + module search path)
    #[serde(default = "default_search_path_flags")]
    pub search_path_flags: Vec<String>,

    /// Prefix joined with the library name to form the link flag
    #[serde(default = "default_link_flag_prefix")]
    pub link_flag_prefix: String,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            mode_flag: default_mode_flag(),
            suppress_warnings_flag: default_suppress_warnings_flag(),
            search_path_flags: default_search_path_flags(),
            link_flag_prefix: default_link_flag_prefix(),
        }
    }
}

fn default_program() -> String {
    "swiftc".to_string()
}

fn default_mode_flag() -> Option<String> {
    Some("--driver-mode=swift".to_string())
}

fn default_suppress_warnings_flag() -> Option<String> {
    Some("-suppress-warnings".to_string())
}

fn default_search_path_flags() -> Vec<String> {
    vec!["-L".to_string(), "-I".to_string()]
}

fn default_link_flag_prefix() -> String {
    "-l".to_string()
}

// ============================================================================
// Capability library
// ============================================================================

/// Where to find the library the script links against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Library name without platform prefix/suffix
    #[serde(default = "default_library_name")]
    pub name: String,

    /// Build-output directories probed in order, relative to the working directory
    #[serde(default = "default_candidates")]
    pub candidates: Vec<PathBuf>,

    /// Precomputed directory checked before the candidates
    #[serde(default)]
    pub override_dir: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: default_library_name(),
            candidates: default_candidates(),
            override_dir: None,
        }
    }
}

impl LibraryConfig {
    /// Platform file name, e.g. `libSakefileDescription.so`.
    pub fn file_name(&self) -> String {
        format!(
            "{}{}{}",
            std::env::consts::DLL_PREFIX,
            self.name,
            std::env::consts::DLL_SUFFIX
        )
    }
}

fn default_library_name() -> String {
    "SakefileDescription".to_string()
}

fn default_candidates() -> Vec<PathBuf> {
    vec![PathBuf::from(".build/debug"), PathBuf::from(".build/release")]
}

// ============================================================================
// Per-run values
// ============================================================================

/// A fully built toolchain command. Token order in `args` is the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Send the child's diagnostic stream to the null device
    pub discard_diagnostics: bool,
    /// Directory the child runs in; inherits the caller's when `None`
    pub current_dir: Option<PathBuf>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::transport::render_command(self))
    }
}

/// Result of running an invocation to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Process exit code; `-1` when terminated by a signal
    pub exit_code: i32,
}

impl ExecOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
