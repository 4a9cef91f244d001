//! `twig checks`: CI status of a pull request

use anyhow::{bail, Result};

use crate::git::Git;
use crate::github::{gh_available, show_pr_checks, PrReference};

/// Show checks for `target`, or for the current branch when omitted
pub fn execute(target: Option<String>) -> Result<()> {
    if !gh_available() {
        bail!("gh not found. Install the GitHub CLI to see PR checks.");
    }
    let git = Git::from_current_dir()?;
    let target = match target {
        Some(text) => PrReference::parse(&text)
            .map(|pr| pr.argument())
            .unwrap_or(text),
        None => git.current_branch()?,
    };
    show_pr_checks(&target, git.cwd());
    Ok(())
}
