//! Worktree operations
//!
//! Core operations for git worktrees: list, add, remove, prune.

use anyhow::{Context, Result};
use std::path::Path;

use super::parser::{parse_worktree_list, Worktree};
use crate::git::errors::{run_guarded, GitError, GitErrorKind};
use crate::git::runner::run_git_checked;

/// List all worktrees of the repository containing `dir`
///
/// Outside a git repository the listing is empty rather than an error.
/// `cwd` decides which worktree is reported as current.
pub fn list_worktrees(dir: &Path, cwd: &Path) -> Result<Vec<Worktree>> {
    let stdout = run_guarded(
        || run_git_checked(&["worktree", "list", "--porcelain"], dir),
        String::new(),
        Some(&[GitErrorKind::NotAGitRepository]),
    )?;

    parse_worktree_list(&stdout, cwd).context("Failed to parse git worktree list output")
}

/// Add a worktree at `path` checking out `branch`
///
/// git creates missing parent directories. An unknown branch is reported as
/// [`GitErrorKind::InvalidReference`].
pub fn add_worktree(path: &Path, branch: &str, dir: &Path) -> Result<(), GitError> {
    let path_str = path.to_string_lossy();
    run_git_checked(&["worktree", "add", &path_str, branch], dir)?;
    Ok(())
}

/// Remove a worktree
///
/// Runs: git worktree remove [--force] <path>
pub fn remove_worktree(path: &Path, force: bool, dir: &Path) -> Result<(), GitError> {
    let path_str = path.to_string_lossy();
    let mut args = vec!["worktree", "remove"];
    if force {
        args.push("--force");
    }
    args.push(&path_str);

    run_git_checked(&args, dir)?;
    Ok(())
}

/// Clean orphaned worktree metadata (prune)
pub fn prune_worktrees(dir: &Path) -> Result<(), GitError> {
    run_git_checked(&["worktree", "prune"], dir)?;
    Ok(())
}
