//! Repository accessor bound to a working directory
//!
//! [`Git`] is constructed once per command and passed down. It memoizes the
//! worktree listing; every mutating call drops the cached listing so the
//! next read re-fetches it.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use super::branch;
use super::errors::GitError;
use super::worktree::{self, Worktree};

pub struct Git {
    cwd: PathBuf,
    worktrees: RefCell<Option<Vec<Worktree>>>,
}

impl Git {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let cwd = cwd.canonicalize().unwrap_or(cwd);
        Self {
            cwd,
            worktrees: RefCell::new(None),
        }
    }

    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::new(cwd))
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Root of the main worktree, `None` outside a repository
    pub fn repo_root_dir(&self) -> Option<PathBuf> {
        worktree::repo_root_dir(&self.cwd)
    }

    pub fn require_repo_root(&self) -> Result<PathBuf> {
        match self.repo_root_dir() {
            Some(root) => Ok(root),
            None => bail!("Not inside a git repository: {}", self.cwd.display()),
        }
    }

    /// Root of the worktree containing the working directory
    pub fn worktree_root_dir(&self) -> Option<PathBuf> {
        worktree::worktree_root_dir(&self.cwd)
    }

    pub fn list_worktrees(&self) -> Result<Vec<Worktree>> {
        if let Some(cached) = self.worktrees.borrow().as_ref() {
            return Ok(cached.clone());
        }
        let listing = worktree::list_worktrees(&self.cwd, &self.cwd)?;
        *self.worktrees.borrow_mut() = Some(listing.clone());
        Ok(listing)
    }

    pub fn invalidate_worktrees(&self) {
        self.worktrees.borrow_mut().take();
    }

    /// The worktree that has `branch` checked out, if any
    pub fn worktree_for_branch(&self, branch: &str) -> Result<Option<Worktree>> {
        Ok(self
            .list_worktrees()?
            .into_iter()
            .find(|wt| wt.branch.as_deref() == Some(branch)))
    }

    pub fn list_branches(&self, remote: bool) -> Result<Vec<String>, GitError> {
        branch::list_branches(remote, &self.cwd)
    }

    pub fn current_branch(&self) -> Result<String, GitError> {
        branch::current_branch(&self.cwd)
    }

    pub fn status(&self, dir: &Path) -> Result<String, GitError> {
        branch::status(dir)
    }

    pub fn last_modified(&self, dir: &Path) -> Result<DateTime<Utc>, GitError> {
        branch::last_modified(dir)
    }

    pub fn create_branch(&self, name: &str, base: Option<&str>) -> Result<(), GitError> {
        branch::create_branch(name, base, &self.cwd)
    }

    pub fn delete_branch(&self, name: &str, force: bool) -> Result<(), GitError> {
        branch::delete_branch(name, force, &self.cwd)
    }

    /// Check out `reference` in `dir` (the working directory when `None`)
    pub fn checkout(&self, reference: &str, dir: Option<&Path>) -> Result<String, GitError> {
        let result = branch::checkout(reference, dir.unwrap_or(&self.cwd));
        self.invalidate_worktrees();
        result
    }

    pub fn fetch(&self, remote: Option<&str>) -> Result<(), GitError> {
        branch::fetch(remote, &self.cwd)
    }

    pub fn add_worktree(&self, path: &Path, branch: &str) -> Result<(), GitError> {
        let result = worktree::add_worktree(path, branch, &self.cwd);
        self.invalidate_worktrees();
        result
    }

    pub fn remove_worktree(&self, path: &Path, force: bool) -> Result<(), GitError> {
        let result = worktree::remove_worktree(path, force, &self.cwd);
        self.invalidate_worktrees();
        result
    }

    pub fn prune_worktrees(&self) -> Result<(), GitError> {
        let result = worktree::prune_worktrees(&self.cwd);
        self.invalidate_worktrees();
        result
    }
}
