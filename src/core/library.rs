//! SK-002: Capability library resolution.
//!
//! Priority: override directory, then each candidate build-output directory
//! in configured order (debug before release by default). Absence is a normal
//! `None`, never an error.

use super::paths::{self, FsProbe, PathProbe};
use super::types::LibraryConfig;
use std::path::{Path, PathBuf};

/// Something that can produce the library path for a run.
pub trait LibraryLocator {
    fn library_path(&self) -> Option<PathBuf>;

    /// Directories that were (or would be) searched, for diagnostics.
    fn searched_dirs(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Resolves the library against a working directory.
#[derive(Debug, Clone)]
pub struct LibraryResolver<P = FsProbe> {
    base_dir: PathBuf,
    file_name: String,
    candidates: Vec<PathBuf>,
    override_dir: Option<PathBuf>,
    probe: P,
}

impl LibraryResolver<FsProbe> {
    /// Resolver probing the real filesystem.
    pub fn new(base_dir: &Path, config: &LibraryConfig) -> Self {
        Self::with_probe(base_dir, config, FsProbe)
    }
}

impl<P: PathProbe> LibraryResolver<P> {
    pub fn with_probe(base_dir: &Path, config: &LibraryConfig, probe: P) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            file_name: config.file_name(),
            candidates: config.candidates.clone(),
            override_dir: config.override_dir.clone(),
            probe,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Resolve the library file, or `None` when no location holds it.
    pub fn resolve_library_path(&self) -> Option<PathBuf> {
        if let Some(dir) = self.override_path() {
            let path = dir.join(&self.file_name);
            if self.probe.exists(&path) {
                tracing::debug!(path = %path.display(), "library found at override");
                return Some(path);
            }
        }

        let found = self
            .candidate_dirs()
            .into_iter()
            .map(|dir| dir.join(&self.file_name))
            .find(|path| self.probe.exists(path));

        match &found {
            Some(path) => tracing::debug!(path = %path.display(), "library found"),
            None => tracing::debug!(file = %self.file_name, "library not found in any candidate"),
        }
        found
    }

    /// Override directory, resolved against the working directory when relative.
    fn override_path(&self) -> Option<PathBuf> {
        self.override_dir
            .as_ref()
            .map(|d| paths::resolve_against(&self.base_dir, d))
    }

    fn candidate_dirs(&self) -> Vec<PathBuf> {
        self.candidates
            .iter()
            .map(|c| paths::resolve_against(&self.base_dir, c))
            .collect()
    }
}

impl<P: PathProbe> LibraryLocator for LibraryResolver<P> {
    fn library_path(&self) -> Option<PathBuf> {
        self.resolve_library_path()
    }

    fn searched_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self.override_path().into_iter().collect();
        dirs.extend(self.candidate_dirs());
        dirs
    }
}

impl<F> LibraryLocator for F
where
    F: Fn() -> Option<PathBuf>,
{
    fn library_path(&self) -> Option<PathBuf> {
        self()
    }
}
