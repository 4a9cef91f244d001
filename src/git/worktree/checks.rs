//! Environment checks
//!
//! Provides functions for checking git availability and worktree support.

use anyhow::{bail, Context, Result};
use std::process::Command;

/// Check if git is available and return its version string
///
/// The error classifier depends on git's message wording, so the version is
/// logged as a compatibility hint.
pub fn check_git_available() -> Result<String> {
    let output = Command::new("git")
        .args(["--version"])
        .output()
        .with_context(|| "Git is not installed or not in PATH")?;

    if !output.status.success() {
        bail!("Git is not working properly");
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    tracing::debug!(%version, "detected git");
    Ok(version)
}

/// Check if git worktree is supported (git 2.15+)
pub fn check_worktree_support() -> Result<()> {
    check_git_available()?;

    let output = Command::new("git").args(["worktree", "-h"]).output();

    match output {
        // `-h` exits with 129 after printing usage
        Ok(o) if usage_mentions_worktree(&o.stdout) || usage_mentions_worktree(&o.stderr) => Ok(()),
        _ => bail!("Git worktree feature not supported. Requires git 2.15+"),
    }
}

fn usage_mentions_worktree(bytes: &[u8]) -> bool {
    String::from_utf8_lossy(bytes).contains("git worktree add")
}
