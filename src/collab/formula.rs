//! SK-024: Package formula update and audit.
//!
//! Update: fetch the release archive, hash it, rewrite the formula's `url`
//! and `sha256` lines. Audit: swap the package manager's copy of the formula
//! for a symlink to ours, audit, and remove the link if the audit fails.

use super::shell;
use crate::core::error::SakeError;
use crate::transport::shell_quote;
use regex::{Captures, Regex};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

const STREAM_BUF_SIZE: usize = 65536;

/// Hex SHA-256 of a file's contents.
pub fn sha256_file(path: &Path) -> Result<String, SakeError> {
    let label = format!("sha256 {}", path.display());
    let mut file = std::fs::File::open(path).map_err(|e| SakeError::collaborator(&label, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; STREAM_BUF_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| SakeError::collaborator(&label, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect())
}

/// Replace the `url` and `sha256` lines of a formula, keeping indentation.
pub fn rewrite_formula(content: &str, url: &str, sha256: &str) -> Result<String, SakeError> {
    let content = replace_line(content, "url", url)?;
    replace_line(&content, "sha256", sha256)
}

fn replace_line(content: &str, key: &str, value: &str) -> Result<String, SakeError> {
    let label = format!("rewrite formula {}", key);
    let re = Regex::new(&format!(r"(?m)^([ \t]*){} .*$", key))
        .map_err(|e| SakeError::collaborator(&label, e))?;
    if !re.is_match(content) {
        return Err(SakeError::collaborator(&label, format!("no `{}` line", key)));
    }
    Ok(re
        .replace_all(content, |caps: &Captures| {
            format!("{}{} \"{}\"", &caps[1], key, value)
        })
        .into_owned())
}

/// Download `url` to `dest` with curl.
pub fn fetch_archive(url: &str, dest: &Path) -> Result<(), SakeError> {
    shell::run_and_print(&format!(
        "curl -LSs {} -o {}",
        shell_quote(url),
        shell_quote(&dest.display().to_string())
    ))
}

/// Point the formula at `archive_url`, returning the archive's SHA-256.
/// The downloaded archive is removed afterwards.
pub fn update_formula(formula: &Path, archive_url: &str) -> Result<String, SakeError> {
    let label = format!("update formula {}", formula.display());
    let archive = formula.with_extension("download.tar.gz");

    fetch_archive(archive_url, &archive)?;
    let sha = sha256_file(&archive);
    let _ = std::fs::remove_file(&archive);
    let sha = sha?;

    let content =
        std::fs::read_to_string(formula).map_err(|e| SakeError::collaborator(&label, e))?;
    let updated = rewrite_formula(&content, archive_url, &sha)?;
    std::fs::write(formula, updated).map_err(|e| SakeError::collaborator(&label, e))?;
    tracing::info!(formula = %formula.display(), sha256 = %sha, "formula updated");
    Ok(sha)
}

/// Audit `current` in place of `installed` by symlinking one to the other.
/// The link stays after a successful audit and is removed after a failed one.
#[cfg(unix)]
pub fn audit(current: &Path, installed: &Path, audit_command: &str) -> Result<(), SakeError> {
    let label = format!("link {} -> {}", installed.display(), current.display());
    if installed.symlink_metadata().is_ok() {
        std::fs::remove_file(installed).map_err(|e| SakeError::collaborator(&label, e))?;
    }
    std::os::unix::fs::symlink(current, installed)
        .map_err(|e| SakeError::collaborator(&label, e))?;

    if let Err(e) = shell::run_and_print(audit_command) {
        let _ = std::fs::remove_file(installed);
        return Err(e);
    }
    Ok(())
}
