//! SK-003: Script location.

use super::paths::{self, PathProbe};
use std::path::{Path, PathBuf};

/// Return the normalized script path if `dir/<script_name>` exists.
/// Re-evaluated on every run; nothing is cached.
pub fn script_path(dir: &Path, script_name: &str, probe: &dyn PathProbe) -> Option<PathBuf> {
    let path = paths::normalize(&dir.join(script_name));
    if probe.exists(&path) {
        Some(path)
    } else {
        None
    }
}
