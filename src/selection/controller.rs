//! Reusing or creating the worktree a branch is worked on in

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::candidate::find_reuse_candidate;
use super::SelectionError;
use crate::config::WorktreesConfig;
use crate::git::worktree::{next_worktree_name, repo_folder_name, worktrees_base_dir};
use crate::git::{Git, GitError, GitErrorKind, Worktree};
use crate::prompt::Prompter;

/// The worktree a branch ended up in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeChoice {
    pub worktree: Worktree,
    pub is_branch_new: bool,
    pub is_worktree_new: bool,
}

pub struct WorktreeController<'a> {
    git: &'a Git,
    prompter: &'a dyn Prompter,
    settings: &'a WorktreesConfig,
}

impl<'a> WorktreeController<'a> {
    pub fn new(git: &'a Git, prompter: &'a dyn Prompter, settings: &'a WorktreesConfig) -> Self {
        Self {
            git,
            prompter,
            settings,
        }
    }

    /// Put `branch` into a clean existing worktree, or a new one when none is free.
    ///
    /// `Ok(None)` means the user declined somewhere along the way.
    pub fn choose_or_create_worktree(
        &self,
        branch: &str,
        allow_new_branch: bool,
    ) -> Result<Option<WorktreeChoice>> {
        self.ensure_not_checked_out(branch)?;

        let Some(candidate) = find_reuse_candidate(self.git)? else {
            return self.create_worktree(branch, allow_new_branch);
        };
        tracing::debug!(
            branch,
            worktree = %candidate.directory.display(),
            "reusing worktree"
        );

        let mut is_branch_new = false;
        match self.git.checkout(branch, Some(&candidate.directory)) {
            Ok(_) => {}
            Err(err) if err.is_kind(GitErrorKind::PathspecDidNotMatchFiles) => {
                let Some(base) = self.confirm_new_branch(branch, allow_new_branch)? else {
                    return Ok(None);
                };
                self.git.create_branch(branch, Some(&base))?;
                self.git
                    .checkout(branch, Some(&candidate.directory))
                    .with_context(|| format!("Failed to check out new branch {branch}"))?;
                is_branch_new = true;
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!(
                        "Failed to check out {branch} in {}",
                        candidate.directory.display()
                    )
                })
            }
        }

        eprintln!(
            "{} Checked out {} in {}",
            "✓".green().bold(),
            branch.cyan(),
            candidate.directory.display()
        );
        let worktree = self.refreshed(&candidate.directory)?.unwrap_or(Worktree {
            branch: Some(branch.to_string()),
            ..candidate
        });
        Ok(Some(WorktreeChoice {
            worktree,
            is_branch_new,
            is_worktree_new: false,
        }))
    }

    /// Add a new worktree at the next free default path with `branch` checked out
    pub fn create_worktree(
        &self,
        branch: &str,
        allow_new_branch: bool,
    ) -> Result<Option<WorktreeChoice>> {
        self.ensure_not_checked_out(branch)?;
        let path = self.default_worktree_path()?;

        let mut is_branch_new = false;
        match self.git.add_worktree(&path, branch) {
            Ok(()) => {}
            Err(err) if is_missing_reference(&err) => {
                let Some(base) = self.confirm_new_branch(branch, allow_new_branch)? else {
                    return Ok(None);
                };
                self.git.create_branch(branch, Some(&base))?;
                self.git
                    .add_worktree(&path, branch)
                    .with_context(|| format!("Failed to add worktree {}", path.display()))?;
                is_branch_new = true;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to add worktree {}", path.display()))
            }
        }

        eprintln!(
            "{} Created worktree {} for {}",
            "✓".green().bold(),
            path.display(),
            branch.cyan()
        );
        let Some(worktree) = self.refreshed(&path)? else {
            bail!("New worktree {} is missing from git's listing", path.display());
        };
        Ok(Some(WorktreeChoice {
            worktree,
            is_branch_new,
            is_worktree_new: true,
        }))
    }

    /// Where the next new worktree goes
    pub fn default_worktree_path(&self) -> Result<PathBuf> {
        let repo_root = self.git.require_repo_root()?;
        let base_dir = worktrees_base_dir(&repo_root, self.settings.directory.as_deref());
        let prefix = self
            .settings
            .prefix_with_repo_name
            .then(|| repo_folder_name(&repo_root));
        let existing = self.git.list_worktrees()?;
        let name = next_worktree_name(&existing, &base_dir, prefix.as_deref());
        Ok(base_dir.join(name))
    }

    fn ensure_not_checked_out(&self, branch: &str) -> Result<()> {
        if let Some(worktree) = self.git.worktree_for_branch(branch)? {
            return Err(SelectionError::BranchCheckedOut {
                branch: branch.to_string(),
                directory: worktree.directory,
            }
            .into());
        }
        Ok(())
    }

    /// Ask whether to create `branch` off the current branch; returns that base
    fn confirm_new_branch(&self, branch: &str, allow_new_branch: bool) -> Result<Option<String>> {
        if !allow_new_branch {
            eprintln!("{} Branch {} does not exist", "!".yellow().bold(), branch.cyan());
            return Ok(None);
        }
        let base = self
            .git
            .current_branch()
            .context("Failed to determine the current branch")?;
        let create = self.prompter.confirm(
            &format!("Branch {branch} does not exist. Create it from {base}?"),
            true,
        )?;
        Ok(create.then_some(base))
    }

    fn refreshed(&self, directory: &Path) -> Result<Option<Worktree>> {
        let directory = directory
            .canonicalize()
            .unwrap_or_else(|_| directory.to_path_buf());
        Ok(self
            .git
            .list_worktrees()?
            .into_iter()
            .find(|wt| wt.directory == directory))
    }
}

fn is_missing_reference(err: &GitError) -> bool {
    err.is_kind(GitErrorKind::InvalidReference) || err.is_kind(GitErrorKind::NotAValidObjectName)
}
