//! Working tree status and last-modified timestamps

use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use std::time::SystemTime;

use crate::git::errors::GitError;
use crate::git::runner::{run_git_checked, run_git_stdout};

/// Short status of a working tree (`git status --short`).
///
/// An empty string means the tree is clean. Untracked files count as dirty.
pub fn status(dir: &Path) -> Result<String, GitError> {
    run_git_stdout(&["status", "--short"], dir).map(|out| out.trim_end().to_string())
}

/// When a worktree was last touched.
///
/// This is the commit date of HEAD, or the newest modification time among
/// changed and untracked files when that is later.
pub fn last_modified(dir: &Path) -> Result<DateTime<Utc>, GitError> {
    let head_date = run_git_checked(&["log", "-1", "--format=%ct"], dir)
        .ok()
        .and_then(|stamp| stamp.parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single());

    let short = status(dir)?;
    let touched = changed_paths(&short)
        .filter_map(|rel| dir.join(rel).metadata().ok())
        .filter_map(|meta| meta.modified().ok())
        .map(DateTime::<Utc>::from)
        .max();

    let fallback = || {
        dir.metadata()
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::from(SystemTime::UNIX_EPOCH))
    };

    Ok(match (head_date, touched) {
        (Some(head), Some(file)) => head.max(file),
        (Some(head), None) => head,
        (None, Some(file)) => file,
        (None, None) => fallback(),
    })
}

/// Paths named in `git status --short` output
///
/// Porcelain format: `XY path` or `XY old -> new` for renames.
fn changed_paths(short: &str) -> impl Iterator<Item = &str> {
    short.lines().filter_map(|line| {
        let path = line.get(3..)?.trim();
        let path = path.rsplit(" -> ").next().unwrap_or(path);
        let path = path.trim_matches('"');
        (!path.is_empty()).then_some(path)
    })
}
