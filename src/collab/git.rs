//! SK-023: Version-control operations.

use crate::core::error::SakeError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git commands scoped to one working tree.
#[derive(Debug, Clone)]
pub struct Git {
    repo: PathBuf,
    envs: Vec<(String, String)>,
}

impl Git {
    pub fn new(repo: &Path) -> Self {
        Self {
            repo: repo.to_path_buf(),
            envs: Vec::new(),
        }
    }

    /// Author and committer identity for commits made through this handle.
    pub fn with_identity(mut self, name: &str, email: &str) -> Self {
        for role in ["AUTHOR", "COMMITTER"] {
            self.envs.push((format!("GIT_{}_NAME", role), name.to_string()));
            self.envs.push((format!("GIT_{}_EMAIL", role), email.to_string()));
        }
        self
    }

    pub fn add_all(&self) -> Result<(), SakeError> {
        self.git(&["add", "--all"]).map(drop)
    }

    pub fn add(&self, paths: &[&str]) -> Result<(), SakeError> {
        let mut args = vec!["add", "--"];
        args.extend_from_slice(paths);
        self.git(&args).map(drop)
    }

    pub fn commit(&self, message: &str) -> Result<(), SakeError> {
        self.git(&["commit", "-m", message]).map(drop)
    }

    /// Commit every tracked modification.
    pub fn commit_all(&self, message: &str) -> Result<(), SakeError> {
        self.git(&["commit", "-a", "-m", message]).map(drop)
    }

    pub fn tag(&self, name: &str) -> Result<(), SakeError> {
        self.git(&["tag", name]).map(drop)
    }

    pub fn push(&self, remote: &str, branch: &str, tags: bool) -> Result<(), SakeError> {
        let mut args = vec!["push", remote, branch];
        if tags {
            args.push("--tags");
        }
        self.git(&args).map(drop)
    }

    /// True when the working tree has staged, unstaged or untracked changes.
    pub fn any_changes(&self) -> Result<bool, SakeError> {
        Ok(!self.git(&["status", "--porcelain"])?.trim().is_empty())
    }

    /// Most recent tag reachable from HEAD.
    pub fn last_tag(&self) -> Result<String, SakeError> {
        Ok(self.git(&["describe", "--abbrev=0", "--tags"])?.trim().to_string())
    }

    fn git(&self, args: &[&str]) -> Result<String, SakeError> {
        let shown = format!("git {}", args.join(" "));
        tracing::debug!(command = %shown, repo = %self.repo.display(), "running");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|e| SakeError::collaborator(&shown, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SakeError::collaborator(
                &shown,
                format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn raw(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap()
            .status;
        assert!(status.success(), "git {:?} failed", args);
    }

    fn init_repo() -> (tempfile::TempDir, Git) {
        let dir = tempfile::tempdir().unwrap();
        raw(dir.path(), &["init", "-q"]);
        raw(dir.path(), &["config", "commit.gpgsign", "false"]);
        raw(dir.path(), &["config", "tag.gpgsign", "false"]);
        let git = Git::new(dir.path()).with_identity("Sake Test", "sake@example.com");
        (dir, git)
    }

    #[test]
    fn test_sk023_release_flow() {
        if !git_available() {
            return;
        }
        let (dir, git) = init_repo();
        assert!(!git.any_changes().unwrap());

        std::fs::write(dir.path().join("README.md"), "v1").unwrap();
        assert!(git.any_changes().unwrap());
        git.add_all().unwrap();
        git.commit("initial").unwrap();
        git.tag("1.0.0").unwrap();
        assert!(!git.any_changes().unwrap());
        assert_eq!(git.last_tag().unwrap(), "1.0.0");

        std::fs::write(dir.path().join("README.md"), "v2").unwrap();
        git.commit_all("[release/1.1.0] Bump version").unwrap();
        git.tag("1.1.0").unwrap();
        assert_eq!(git.last_tag().unwrap(), "1.1.0");
    }

    #[test]
    fn test_sk023_add_paths_and_push() {
        if !git_available() {
            return;
        }
        let (dir, git) = init_repo();
        let remote = tempfile::tempdir().unwrap();
        raw(remote.path(), &["init", "-q", "--bare"]);
        let remote_path = remote.path().display().to_string();
        raw(dir.path(), &["remote", "add", "origin", &remote_path]);

        std::fs::create_dir_all(dir.path().join("Formula")).unwrap();
        std::fs::write(dir.path().join("Formula/sake.rb"), "class Sake; end").unwrap();
        std::fs::write(dir.path().join("untracked.txt"), "x").unwrap();
        git.add(&["Formula/sake.rb"]).unwrap();
        git.commit("[release/1.1.0] Update formula").unwrap();
        // untracked file is left alone
        assert!(git.any_changes().unwrap());

        raw(dir.path(), &["checkout", "-q", "-b", "release/1.1.0"]);
        git.tag("1.1.0").unwrap();
        git.push("origin", "release/1.1.0", true).unwrap();
    }

    #[test]
    fn test_sk023_failure_is_collaborator_error() {
        if !git_available() {
            return;
        }
        let (_dir, git) = init_repo();
        // no commits, so no tags to describe
        let err = git.last_tag().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CollaboratorFailed);
        assert!(err.detail().starts_with("`git describe --abbrev=0 --tags` failed"));
    }
}
