//! Values offered for arguments that depend on the repository or config

use anyhow::Result;

use crate::config::Config;
use crate::git::Git;

/// What kind of value is being completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTarget {
    Branches,
    Workflows,
}

impl std::str::FromStr for CompletionTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "branches" => Ok(Self::Branches),
            "workflows" => Ok(Self::Workflows),
            _ => anyhow::bail!("Unknown completion target: {s}"),
        }
    }
}

/// Local and remote branch names starting with `prefix`
pub fn complete_branches(git: &Git, prefix: &str) -> Result<Vec<String>> {
    let mut names = git.list_branches(false)?;
    for remote in git.list_branches(true)? {
        if !names.contains(&remote) {
            names.push(remote);
        }
    }
    names.retain(|name| name.starts_with(prefix));
    names.sort();
    Ok(names)
}

/// Workflow ids and aliases starting with `prefix`
pub fn complete_workflows(config: &Config, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = config
        .workflows
        .iter()
        .flat_map(|w| std::iter::once(&w.id).chain(&w.aliases))
        .filter(|name| name.starts_with(prefix))
        .cloned()
        .collect();
    names.sort();
    names
}

pub fn complete_dynamic(target: CompletionTarget, prefix: &str) -> Result<Vec<String>> {
    match target {
        CompletionTarget::Branches => {
            let git = Git::from_current_dir()?;
            complete_branches(&git, prefix)
        }
        CompletionTarget::Workflows => Ok(complete_workflows(&Config::load()?, prefix)),
    }
}
