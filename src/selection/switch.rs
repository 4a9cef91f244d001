//! Moving to a branch: pick its worktree, run hooks, open it

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::controller::WorktreeController;
use super::input::BranchSelection;
use crate::config::{Config, HookPoint};
use crate::context::{CliContext, ContextVar};
use crate::git::{Git, Worktree};
use crate::open::{OpenDispatcher, OpenKind, OpenOptions};
use crate::prompt::Prompter;
use crate::workflow::{resolve, RunOptions, RunOutcome, WorkflowRunner};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchOptions {
    /// Offer to create branches that do not exist yet
    pub allow_new_branch: bool,
    pub skip_hooks: bool,
    /// Open in the current editor window; hooks then finish before opening
    pub reuse_window: bool,
    /// Open the worktree at all, rather than only printing its path
    pub open: bool,
    pub run: RunOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub worktree: Worktree,
    /// Hook point that described how the worktree was obtained
    pub hook: HookPoint,
    pub is_branch_new: bool,
    pub is_worktree_new: bool,
    pub opened: bool,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Hook(HookPoint),
    Open,
}

pub struct Switcher<'a> {
    git: &'a Git,
    config: &'a Config,
    prompter: &'a dyn Prompter,
    opener: &'a OpenDispatcher,
    context: CliContext,
}

impl<'a> Switcher<'a> {
    pub fn new(
        git: &'a Git,
        config: &'a Config,
        prompter: &'a dyn Prompter,
        opener: &'a OpenDispatcher,
    ) -> Self {
        Self {
            git,
            config,
            prompter,
            opener,
            context: CliContext::from_git(git),
        }
    }

    pub fn context(&self) -> &CliContext {
        &self.context
    }

    /// Get `selection` into a worktree and open it.
    ///
    /// `Ok(None)` is a quiet abort: the branch was new and new branches were
    /// not allowed, or the user declined a prompt.
    pub fn switch_to(
        &mut self,
        selection: &BranchSelection,
        options: &SwitchOptions,
    ) -> Result<Option<SwitchOutcome>> {
        let branch = selection.name();
        if selection.is_new() && !options.allow_new_branch {
            eprintln!("{} Branch {} does not exist", "!".yellow().bold(), branch.cyan());
            return Ok(None);
        }

        let (worktree, hook, is_branch_new, is_worktree_new) =
            match self.git.worktree_for_branch(branch)? {
                Some(worktree) => {
                    eprintln!(
                        "{} {} is already checked out in {}",
                        "→".cyan(),
                        branch.cyan(),
                        worktree.directory.display()
                    );
                    (worktree, HookPoint::OnSwitch, false, false)
                }
                None => {
                    let controller =
                        WorktreeController::new(self.git, self.prompter, &self.config.worktrees);
                    let Some(choice) =
                        controller.choose_or_create_worktree(branch, options.allow_new_branch)?
                    else {
                        eprintln!("{}", "Aborted".dimmed());
                        return Ok(None);
                    };
                    let hook = if choice.is_worktree_new {
                        HookPoint::OnCreate
                    } else {
                        HookPoint::OnCheckout
                    };
                    (choice.worktree, hook, choice.is_branch_new, choice.is_worktree_new)
                }
            };

        let stages = if options.reuse_window {
            [Stage::Hook(hook), Stage::Hook(HookPoint::BeforeOpen), Stage::Open]
        } else {
            [Stage::Hook(HookPoint::BeforeOpen), Stage::Open, Stage::Hook(hook)]
        };

        let mut opened = false;
        for stage in stages {
            match stage {
                Stage::Hook(point) => {
                    let outcome = self.run_hook(point, &worktree.directory, options)?;
                    if outcome != RunOutcome::Completed {
                        eprintln!("{} {point} hook aborted", "!".yellow().bold());
                        break;
                    }
                }
                Stage::Open => opened = self.open(&worktree.directory, options)?,
            }
        }

        Ok(Some(SwitchOutcome {
            worktree,
            hook,
            is_branch_new,
            is_worktree_new,
            opened,
        }))
    }

    /// Run the workflow configured for `point`, if any
    pub fn run_hook(
        &mut self,
        point: HookPoint,
        worktree_dir: &Path,
        options: &SwitchOptions,
    ) -> Result<RunOutcome> {
        if options.skip_hooks {
            return Ok(RunOutcome::Completed);
        }
        let Some(repo_root) = self.git.repo_root_dir() else {
            return Ok(RunOutcome::Completed);
        };
        let Some(id) = self.config.hook(&repo_root, point) else {
            return Ok(RunOutcome::Completed);
        };

        self.context.set_path(ContextVar::NewWorktreeRoot, worktree_dir);
        tracing::debug!(hook = %point, workflow = id, "running hook");
        let resolved = resolve(&self.config.workflows, id, &self.context)?;
        WorkflowRunner::new(self.prompter, options.run).run(&resolved)
    }

    fn open(&self, dir: &Path, options: &SwitchOptions) -> Result<bool> {
        let target = dir.display().to_string();
        if !options.open {
            println!("{target}");
            return Ok(false);
        }
        let open_options = OpenOptions {
            reuse_window: options.reuse_window,
            wait_for_close: false,
        };
        self.opener
            .open(&target, OpenKind::Folder, &open_options, self.prompter)
    }
}
