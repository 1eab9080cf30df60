//! SK-005: Toolchain invocation construction.
//!
//! Token order: mode flag, warning suppression, search-path flags (each
//! followed by the library directory), link flag, script path, forwarded
//! arguments. Some toolchains are positional, so this order is fixed.

use super::types::{Invocation, ToolchainConfig};
use std::path::Path;

/// Build the invocation for `script` linking the library at `library`.
///
/// Search-path flags reference the library's parent directory, never the
/// library file itself.
pub fn build_invocation(
    toolchain: &ToolchainConfig,
    library_name: &str,
    library: &Path,
    script: &Path,
    forwarded: &[String],
    verbose: bool,
) -> Invocation {
    let lib_dir = library
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());

    let mut args =
        Vec::with_capacity(6 + toolchain.search_path_flags.len() * 2 + forwarded.len());
    if let Some(mode) = &toolchain.mode_flag {
        args.push(mode.clone());
    }
    if let Some(suppress) = &toolchain.suppress_warnings_flag {
        args.push(suppress.clone());
    }
    for flag in &toolchain.search_path_flags {
        args.push(flag.clone());
        args.push(lib_dir.clone());
    }
    args.push(format!("{}{}", toolchain.link_flag_prefix, library_name));
    args.push(script.display().to_string());
    args.extend(forwarded.iter().cloned());

    Invocation {
        program: toolchain.program.clone(),
        args,
        discard_diagnostics: !verbose,
        current_dir: None,
    }
}
