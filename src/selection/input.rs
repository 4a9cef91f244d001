//! Turning what the user typed into a branch

use anyhow::{Context, Result};

use crate::git::branch::normalize_branch_name;
use crate::git::Git;
use crate::github::{pr_head_branch, PrReference};
use crate::prompt::Prompter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchSelection {
    /// The branch exists locally or on a remote
    Existing(String),
    /// Nothing by that name exists yet
    New(String),
}

impl BranchSelection {
    pub fn name(&self) -> &str {
        match self {
            Self::Existing(name) | Self::New(name) => name,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Self::New(_))
    }
}

/// Classify a normalized branch name against known local and remote branches
pub fn lookup_branch(name: &str, local: &[String], remote: &[String]) -> BranchSelection {
    if local.iter().chain(remote).any(|b| b == name) {
        BranchSelection::Existing(name.to_string())
    } else {
        BranchSelection::New(name.to_string())
    }
}

/// Resolve a branch name, PR number or PR URL.
///
/// Without input the user is asked for a branch name. `Ok(None)` when they
/// give none.
pub fn resolve_input(
    git: &Git,
    prompter: &dyn Prompter,
    input: Option<&str>,
    fetch: bool,
) -> Result<Option<BranchSelection>> {
    let input = match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => text.to_string(),
        None => match prompter.input("Branch name or PR")? {
            Some(text) => text,
            None => return Ok(None),
        },
    };

    if fetch {
        if let Err(err) = git.fetch(None) {
            tracing::warn!(error = %err, "fetch failed, using local refs");
        }
    }

    if let Some(pr) = PrReference::parse(&input) {
        let head = pr_head_branch(&pr, git.cwd())
            .with_context(|| format!("Failed to resolve pull request #{}", pr.number))?;
        return Ok(Some(BranchSelection::Existing(normalize_branch_name(&head))));
    }

    let name = normalize_branch_name(&input);
    let local = git.list_branches(false)?;
    let remote = git.list_branches(true)?;
    Ok(Some(lookup_branch(&name, &local, &remote)))
}
