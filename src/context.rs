//! Interpolation variables shared by hook and workflow execution

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::git::Git;

/// Well-known context variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextVar {
    /// Root of the main worktree
    RepoRoot,
    /// Root of the worktree the command was started in
    WorktreeRoot,
    /// Directory the command was started in
    Cwd,
    /// Worktree a hook is running for
    NewWorktreeRoot,
}

impl ContextVar {
    pub fn key(&self) -> &'static str {
        match self {
            Self::RepoRoot => "repoRoot",
            Self::WorktreeRoot => "worktreeRoot",
            Self::Cwd => "cwd",
            Self::NewWorktreeRoot => "newWorktreeRoot",
        }
    }

    pub fn all() -> &'static [ContextVar] {
        &[
            Self::RepoRoot,
            Self::WorktreeRoot,
            Self::Cwd,
            Self::NewWorktreeRoot,
        ]
    }
}

impl fmt::Display for ContextVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Key-value store consulted by `${name}` interpolation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliContext {
    values: BTreeMap<String, String>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context from the repository state around the working directory.
    ///
    /// Outside a repository only `cwd` is set.
    pub fn from_git(git: &Git) -> Self {
        let mut context = Self::new();
        context.set_path(ContextVar::Cwd, git.cwd());
        if let Some(root) = git.repo_root_dir() {
            context.set_path(ContextVar::RepoRoot, &root);
        }
        if let Some(root) = git.worktree_root_dir() {
            context.set_path(ContextVar::WorktreeRoot, &root);
        }
        context
    }

    pub fn set(&mut self, var: ContextVar, value: impl Into<String>) {
        self.values.insert(var.key().to_string(), value.into());
    }

    pub fn set_path(&mut self, var: ContextVar, path: &Path) {
        self.set(var, path.display().to_string());
    }

    /// Set an arbitrary variable
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn unset(&mut self, var: ContextVar) {
        self.values.remove(var.key());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn var(&self, var: ContextVar) -> Option<&str> {
        self.get(var.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
