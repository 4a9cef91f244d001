//! Core branch operations: create, delete, list, checkout, fetch

use std::collections::BTreeSet;
use std::path::Path;

use super::naming::normalize_branch_name;
use crate::git::errors::GitError;
use crate::git::runner::{run_git_bool, run_git_checked, run_git_combined};

/// Create a new branch from a base
pub fn create_branch(name: &str, base: Option<&str>, dir: &Path) -> Result<(), GitError> {
    let mut args = vec!["branch", name];
    if let Some(b) = base {
        args.push(b);
    }

    run_git_checked(&args, dir)?;
    Ok(())
}

/// Delete a branch
pub fn delete_branch(name: &str, force: bool, dir: &Path) -> Result<(), GitError> {
    let flag = if force { "-D" } else { "-d" };

    run_git_checked(&["branch", flag, name], dir)?;
    Ok(())
}

/// Get the current branch name
pub fn current_branch(dir: &Path) -> Result<String, GitError> {
    run_git_checked(&["rev-parse", "--abbrev-ref", "HEAD"], dir)
}

/// List local or remote branch names, normalized and deduplicated
///
/// Remote HEAD pointers and detached-HEAD entries are dropped.
pub fn list_branches(remote: bool, dir: &Path) -> Result<Vec<String>, GitError> {
    let mut args = vec!["branch"];
    if remote {
        args.push("--remote");
    }
    args.push("--format=%(refname)");

    let stdout = run_git_checked(&args, dir)?;
    Ok(parse_branch_list(&stdout))
}

pub(super) fn parse_branch_list(output: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('('))
        .map(normalize_branch_name)
        .filter(|name| !name.is_empty() && name != "HEAD" && !name.ends_with("/HEAD"))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Check if a local branch exists
pub fn branch_exists(name: &str, dir: &Path) -> bool {
    let ref_path = format!("refs/heads/{name}");
    run_git_bool(&["rev-parse", "--verify", "--quiet", &ref_path], dir)
}

/// Check out a branch or ref inside `dir`, returning git's output text
pub fn checkout(reference: &str, dir: &Path) -> Result<String, GitError> {
    run_git_combined(&["checkout", reference], dir)
}

/// Fetch from one remote, or all remotes when `remote` is None
pub fn fetch(remote: Option<&str>, dir: &Path) -> Result<(), GitError> {
    let mut args = vec!["fetch", "--quiet"];
    match remote {
        Some(name) => args.push(name),
        None => args.push("--all"),
    }
    run_git_checked(&args, dir)?;
    Ok(())
}
