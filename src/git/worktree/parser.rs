//! Worktree output parsing
//!
//! Parses `git worktree list --porcelain` output into structured data.

use anyhow::{bail, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::git::branch::normalize_branch_name;

/// A worktree as reported by `git worktree list --porcelain`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worktree {
    pub directory: PathBuf,
    /// Normalized branch name, `None` when detached or bare
    pub branch: Option<String>,
    pub head: Option<String>,
    pub is_main: bool,
    pub is_current: bool,
    pub is_detached: bool,
    pub is_locked: bool,
    pub lock_reason: Option<String>,
    pub is_prunable: bool,
    pub prunable_reason: Option<String>,
    pub is_bare: bool,
}

impl Worktree {
    fn at(directory: PathBuf) -> Self {
        Self {
            directory,
            branch: None,
            head: None,
            is_main: false,
            is_current: false,
            is_detached: false,
            is_locked: false,
            lock_reason: None,
            is_prunable: false,
            prunable_reason: None,
            is_bare: false,
        }
    }

    /// Directory name of the worktree, used as its short display name
    pub fn name(&self) -> String {
        self.directory
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.directory.display().to_string())
    }
}

/// Parse git worktree list --porcelain output
///
/// Blocks are separated by blank lines. Within a block the lines may come in
/// any order. The first block is the main worktree.
///
/// Example input:
/// ```text
/// worktree /home/user/repo
/// HEAD abc123def456
/// branch refs/heads/main
///
/// worktree /home/user/repo.worktrees/1
/// HEAD def789abc012
/// detached
/// locked in use by ci
/// ```
///
/// `cwd` decides which worktree is marked current.
pub fn parse_worktree_list(output: &str, cwd: &Path) -> Result<Vec<Worktree>> {
    let mut worktrees = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in output.lines().chain(std::iter::once("")) {
        if line.trim().is_empty() {
            if !block.is_empty() {
                worktrees.push(parse_block(&block)?);
                block.clear();
            }
        } else {
            block.push(line);
        }
    }

    if let Some(first) = worktrees.first_mut() {
        first.is_main = true;
    }
    mark_current(&mut worktrees, cwd);

    Ok(worktrees)
}

fn parse_block(lines: &[&str]) -> Result<Worktree> {
    let mut directory: Option<PathBuf> = None;
    let mut worktree = Worktree::at(PathBuf::new());

    for line in lines {
        let (label, value) = match line.split_once(' ') {
            Some((label, value)) => (label, Some(value.trim())),
            None => (line.trim(), None),
        };
        let reason = value.filter(|v| !v.is_empty()).map(str::to_string);

        match label {
            "worktree" => directory = value.map(PathBuf::from),
            "HEAD" => worktree.head = value.map(str::to_string),
            "branch" => worktree.branch = value.map(normalize_branch_name),
            "bare" => worktree.is_bare = true,
            "detached" => worktree.is_detached = true,
            "locked" => {
                worktree.is_locked = true;
                worktree.lock_reason = reason;
            }
            "prunable" => {
                worktree.is_prunable = true;
                worktree.prunable_reason = reason;
            }
            _ => {}
        }
    }

    match directory {
        Some(dir) if !dir.as_os_str().is_empty() => {
            worktree.directory = dir;
            Ok(worktree)
        }
        _ => bail!(
            "corrupt worktree listing: block without a `worktree` line:\n{}",
            lines.join("\n")
        ),
    }
}

/// Mark the worktree containing `cwd` as current; with nested worktrees the
/// deepest directory wins.
fn mark_current(worktrees: &mut [Worktree], cwd: &Path) {
    let current = worktrees
        .iter()
        .enumerate()
        .filter(|(_, wt)| cwd.starts_with(&wt.directory))
        .max_by_key(|(_, wt)| wt.directory.components().count())
        .map(|(idx, _)| idx);

    for (idx, wt) in worktrees.iter_mut().enumerate() {
        wt.is_current = Some(idx) == current;
    }
}
