//! Worktree management commands
//! Usage: twig worktree [list|remove <name>|prune]

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::git::{Git, Worktree};
use crate::utils::{display_path, tilde_path, truncate};

/// List all worktrees of the current repository
pub fn list() -> Result<()> {
    let git = Git::from_current_dir()?;
    let repo_root = git.require_repo_root()?;
    let worktrees = git.list_worktrees()?;

    println!("Worktrees of {}:", tilde_path(&repo_root).bold());
    println!("{}", "─".repeat(50).dimmed());

    let base = repo_root.parent().unwrap_or(&repo_root);
    for worktree in &worktrees {
        let marker = if worktree.is_current { "*".green().bold() } else { " ".normal() };
        let branch = match &worktree.branch {
            Some(branch) => truncate(branch, 40).cyan(),
            None => "(detached)".dimmed(),
        };
        let dirty = !worktree.is_bare
            && git
                .status(&worktree.directory)
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false);
        println!(
            "{marker} {:<30} {branch}{}",
            display_path(&worktree.directory, base),
            flags(worktree, dirty)
        );
    }
    Ok(())
}

fn flags(worktree: &Worktree, dirty: bool) -> String {
    let mut flags = Vec::new();
    if worktree.is_main {
        flags.push("main".to_string());
    }
    if dirty {
        flags.push("dirty".to_string());
    }
    if worktree.is_locked {
        flags.push(match &worktree.lock_reason {
            Some(reason) => format!("locked: {}", truncate(reason, 30)),
            None => "locked".to_string(),
        });
    }
    if worktree.is_prunable {
        flags.push("prunable".to_string());
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" {}", format!("[{}]", flags.join(", ")).yellow())
    }
}

/// Find a worktree by directory name, branch or path
pub fn find_worktree<'a>(worktrees: &'a [Worktree], query: &str, cwd: &Path) -> Option<&'a Worktree> {
    let as_path = cwd.join(query);
    let as_path = as_path.canonicalize().unwrap_or(as_path);
    worktrees
        .iter()
        .find(|w| w.directory == as_path)
        .or_else(|| worktrees.iter().find(|w| w.branch.as_deref() == Some(query)))
        .or_else(|| worktrees.iter().find(|w| w.name() == query))
}

/// Remove a worktree and, unless asked not to, the branch it had checked out
pub fn remove(query: String, force: bool, keep_branch: bool) -> Result<()> {
    let git = Git::from_current_dir()?;
    git.require_repo_root()?;
    let worktrees = git.list_worktrees()?;

    let Some(worktree) = find_worktree(&worktrees, &query, git.cwd()) else {
        bail!("No worktree matches '{query}'. Run 'twig worktree list' to see them.");
    };
    if worktree.is_main {
        bail!("Refusing to remove the main worktree");
    }
    if worktree.is_current {
        bail!("Cannot remove the worktree you are in. Change directory first.");
    }

    git.remove_worktree(&worktree.directory, force)
        .with_context(|| format!("Failed to remove worktree {}", worktree.directory.display()))?;
    println!(
        "{} Removed worktree {}",
        "✓".green().bold(),
        worktree.directory.display()
    );

    if let (Some(branch), false) = (&worktree.branch, keep_branch) {
        // best-effort: unmerged branches are kept
        match git.delete_branch(branch, false) {
            Ok(()) => println!("{} Deleted branch {}", "✓".green().bold(), branch.cyan()),
            Err(err) => {
                tracing::warn!(branch = %branch, error = %err, "branch not deleted");
                println!(
                    "{} Kept branch {} ({})",
                    "!".yellow().bold(),
                    branch.cyan(),
                    err.to_string().lines().next().unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}

/// Drop administrative data of worktrees whose directories are gone
pub fn prune() -> Result<()> {
    let git = Git::from_current_dir()?;
    git.require_repo_root()?;
    let stale: Vec<Worktree> = git.list_worktrees()?.into_iter().filter(|w| w.is_prunable).collect();

    git.prune_worktrees().context("Failed to prune worktrees")?;

    if stale.is_empty() {
        println!("{} Nothing to prune", "✓".green().bold());
    } else {
        for worktree in &stale {
            println!("  {} {}", "−".red(), worktree.directory.display());
        }
        println!("{} Pruned {} stale worktree(s)", "✓".green().bold(), stale.len());
    }
    Ok(())
}
