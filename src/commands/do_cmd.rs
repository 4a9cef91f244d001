//! `twig do`: get a branch or pull request into a worktree and open it

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::git::{self, Git};
use crate::github::{show_pr_checks, PrReference};
use crate::open::OpenDispatcher;
use crate::prompt::{DialoguerPrompter, Prompter};
use crate::selection::{resolve_input, SwitchOptions, SwitchOutcome, Switcher};

#[derive(Debug, Clone, Default)]
pub struct DoArgs {
    /// Branch name, PR number or PR URL; asked for when absent
    pub input: Option<String>,
    /// Fetch from the remote before looking the branch up
    pub fetch: bool,
    /// Show `gh pr checks` once the worktree is ready
    pub checks: bool,
    pub switch: SwitchOptions,
}

pub fn execute(mut args: DoArgs) -> Result<()> {
    git::init()?;
    let git = Git::from_current_dir()?;
    let config = Config::load().context("Failed to load configuration")?;
    let prompter = DialoguerPrompter::new();
    let opener = OpenDispatcher::with_defaults().with_preferred(config.editor.preferred.clone());

    args.switch.reuse_window |= config.editor.reuse_window;
    run(&git, &config, &prompter, &opener, &args)?;
    Ok(())
}

/// Do the work of `twig do` with explicit collaborators.
///
/// `Ok(None)` when the user backed out at some point.
pub fn run(
    git: &Git,
    config: &Config,
    prompter: &dyn Prompter,
    opener: &OpenDispatcher,
    args: &DoArgs,
) -> Result<Option<SwitchOutcome>> {
    git.require_repo_root()?;

    let Some(selection) = resolve_input(git, prompter, args.input.as_deref(), args.fetch)? else {
        eprintln!("{}", "Aborted".dimmed());
        return Ok(None);
    };
    tracing::debug!(branch = selection.name(), new = selection.is_new(), "resolved input");

    let mut switcher = Switcher::new(git, config, prompter, opener);
    let Some(outcome) = switcher.switch_to(&selection, &args.switch)? else {
        return Ok(None);
    };

    report(&outcome);

    if args.checks && !outcome.is_branch_new {
        // gh accepts the branch name as well as the original PR reference
        let target = args
            .input
            .as_deref()
            .and_then(PrReference::parse)
            .map(|pr| pr.argument())
            .unwrap_or_else(|| selection.name().to_string());
        show_pr_checks(&target, &outcome.worktree.directory);
    }

    Ok(Some(outcome))
}

fn report(outcome: &SwitchOutcome) {
    let branch = outcome.worktree.branch.as_deref().unwrap_or("(detached)");
    let what = match (outcome.is_branch_new, outcome.is_worktree_new) {
        (true, true) => "Created branch and worktree",
        (true, false) => "Created branch in reused worktree",
        (false, true) => "Created worktree",
        (false, false) => "Using worktree",
    };
    eprintln!(
        "{} {} {} at {}",
        "✓".green().bold(),
        what,
        branch.cyan(),
        outcome.worktree.directory.display()
    );
}
