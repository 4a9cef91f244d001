//! Picking an existing worktree to reuse for another branch

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::git::{Git, Worktree};

/// A worktree together with the facts reuse depends on
#[derive(Debug, Clone)]
pub struct Candidate {
    pub worktree: Worktree,
    pub is_clean: bool,
    pub last_modified: DateTime<Utc>,
}

/// Worktrees that may ever be repurposed, regardless of their state
pub fn is_reusable(worktree: &Worktree) -> bool {
    !worktree.is_main
        && !worktree.is_bare
        && !worktree.is_locked
        && !worktree.is_prunable
        && !worktree.is_current
}

/// The clean, reusable worktree that was touched least recently
pub fn pick_reuse_candidate(candidates: Vec<Candidate>) -> Option<Worktree> {
    candidates
        .into_iter()
        .filter(|c| c.is_clean && is_reusable(&c.worktree))
        .min_by_key(|c| c.last_modified)
        .map(|c| c.worktree)
}

/// Inspect every reusable worktree and pick the one to reuse
pub fn find_reuse_candidate(git: &Git) -> Result<Option<Worktree>> {
    let candidates = git
        .list_worktrees()?
        .into_iter()
        .filter(is_reusable)
        .filter_map(|worktree| inspect(git, worktree))
        .collect();
    Ok(pick_reuse_candidate(candidates))
}

/// Clean worktree with its modification time; `None` when dirty or unreadable
fn inspect(git: &Git, worktree: Worktree) -> Option<Candidate> {
    let is_clean = match git.status(&worktree.directory) {
        Ok(status) => status.is_empty(),
        Err(err) => {
            tracing::warn!(
                worktree = %worktree.directory.display(),
                error = %err,
                "could not read worktree status, not reusing it"
            );
            return None;
        }
    };
    if !is_clean {
        tracing::debug!(worktree = %worktree.directory.display(), "dirty, skipping");
        return None;
    }
    let last_modified = match git.last_modified(&worktree.directory) {
        Ok(time) => time,
        Err(err) => {
            tracing::warn!(
                worktree = %worktree.directory.display(),
                error = %err,
                "could not read worktree modification time, not reusing it"
            );
            return None;
        }
    };
    Some(Candidate {
        worktree,
        is_clean,
        last_modified,
    })
}
