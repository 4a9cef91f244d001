//! Git command runner abstraction
//!
//! Provides centralized functions for running git commands with consistent
//! error handling. Failures are turned into [`GitError`] values, classified
//! against the known stderr patterns.

use std::path::Path;
use std::process::{Command, Output};

use super::errors::GitError;

/// Run a git command and return the raw Output.
///
/// git runs with the C locale so the stderr classifier sees untranslated
/// messages.
///
/// # Arguments
/// * `args` - Git command arguments (e.g., `&["branch", "-v"]`)
/// * `dir` - Working directory for the git command
pub fn run_git(args: &[&str], dir: &Path) -> Result<Output, GitError> {
    tracing::debug!(dir = %dir.display(), "git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("LC_ALL", "C")
        .env("LANGUAGE", "C")
        .output()
        .map_err(|source| GitError::Spawn {
            command: args.join(" "),
            source,
        })
}

/// Run a git command, check for success, and return stdout as a trimmed String.
///
/// On failure, returns the classified error built from stderr.
pub fn run_git_checked(args: &[&str], dir: &Path) -> Result<String, GitError> {
    run_git_stdout(args, dir).map(|stdout| stdout.trim().to_string())
}

/// Like [`run_git_checked`], but keeps stdout untouched.
///
/// Needed for column-sensitive output such as `git status --short`.
pub fn run_git_stdout(args: &[&str], dir: &Path) -> Result<String, GitError> {
    let output = run_git(args, dir)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!(status = ?output.status.code(), "git failed: {}", stderr.trim());
        return Err(GitError::from_failure(
            &args.join(" "),
            output.status.code(),
            &stderr,
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Like [`run_git_checked`], but returns stdout and stderr combined.
///
/// Commands such as `git checkout` report progress on stderr only.
pub fn run_git_combined(args: &[&str], dir: &Path) -> Result<String, GitError> {
    let output = run_git(args, dir)?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(GitError::from_failure(
            &args.join(" "),
            output.status.code(),
            &stderr,
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let combined = [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(combined)
}

/// Run a git command and return true if exit code is 0.
///
/// Silently swallows errors (both spawn failures and non-zero exits).
/// Use this for status checks like `rev-parse --verify`.
pub fn run_git_bool(args: &[&str], dir: &Path) -> bool {
    run_git(args, dir)
        .map(|output| output.status.success())
        .unwrap_or(false)
}
