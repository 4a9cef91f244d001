use anyhow::Result;
use clap::CommandFactory;
use std::str::FromStr;

use twig::commands::do_cmd::DoArgs;
use twig::commands::{checks, do_cmd, open_cmd, workflow_cmd, worktree_cmd};
use twig::completions::{complete_dynamic, generate_completions, CompletionTarget, Shell};
use twig::selection::SwitchOptions;
use twig::workflow::RunOptions;

use super::types::{Cli, Commands, DoCommand, WorkflowCommands, WorktreeCommands};

pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Do(args) => do_cmd::execute(do_args(args)),
        Commands::Worktree { command } => match command {
            WorktreeCommands::List => worktree_cmd::list(),
            WorktreeCommands::Remove {
                name,
                force,
                keep_branch,
            } => worktree_cmd::remove(name, force, keep_branch),
            WorktreeCommands::Prune => worktree_cmd::prune(),
        },
        Commands::Workflow { command } => match command {
            WorkflowCommands::List => workflow_cmd::list(),
            WorkflowCommands::Show { id, vars } => workflow_cmd::show(id, vars),
            WorkflowCommands::Run {
                id,
                vars,
                yes,
                continue_on_error,
            } => workflow_cmd::run(
                id,
                vars,
                RunOptions {
                    auto_confirm: yes,
                    continue_on_error,
                },
            ),
        },
        Commands::Open {
            target,
            reuse_window,
            wait,
        } => open_cmd::execute(target, reuse_window, wait),
        Commands::Checks { target } => checks::execute(target),
        Commands::Completions { shell } => {
            let shell = Shell::from_str(&shell)?;
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut std::io::stdout());
            Ok(())
        }
        Commands::Complete { target, prefix } => {
            let target = CompletionTarget::from_str(&target)?;
            for value in complete_dynamic(target, &prefix)? {
                println!("{value}");
            }
            Ok(())
        }
    }
}

fn do_args(args: DoCommand) -> DoArgs {
    DoArgs {
        input: args.input,
        fetch: !args.no_fetch,
        checks: args.checks,
        switch: SwitchOptions {
            allow_new_branch: !args.no_new,
            skip_hooks: args.skip_hooks,
            reuse_window: args.reuse_window,
            open: !args.no_open,
            run: RunOptions {
                auto_confirm: args.yes,
                continue_on_error: args.continue_on_error,
            },
        },
    }
}
