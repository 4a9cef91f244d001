//! Workflow commands
//! Usage: twig workflow [list|show <id>|run <id>]

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::context::CliContext;
use crate::git::Git;
use crate::prompt::DialoguerPrompter;
use crate::workflow::{resolve, ResolvedStep, ResolvedWorkflow, RunOptions, RunOutcome, WorkflowRunner};

/// List configured workflows
pub fn list() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    if config.workflows.is_empty() {
        println!("No workflows configured");
        return Ok(());
    }

    println!("Workflows:");
    println!("{}", "─".repeat(50).dimmed());
    for workflow in config.workflows.iter() {
        let aliases = if workflow.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", workflow.aliases.join(", "))
        };
        let confirm = if workflow.confirm { " [confirm]".yellow().to_string() } else { String::new() };
        println!(
            "  {}{} {} {}{confirm}",
            workflow.id.cyan(),
            aliases.dimmed(),
            workflow.display_name(),
            format!("{} step(s)", workflow.steps.len()).dimmed()
        );
    }
    Ok(())
}

/// Interpolation context for workflows run by hand: the repository
/// variables plus `KEY=VALUE` pairs from the command line
pub fn build_context(git: &Git, vars: &[String]) -> Result<CliContext> {
    let mut context = CliContext::from_git(git);
    for var in vars {
        let Some((key, value)) = var.split_once('=') else {
            bail!("Invalid variable '{var}', expected KEY=VALUE");
        };
        if key.trim().is_empty() {
            bail!("Invalid variable '{var}', the name is empty");
        }
        context.insert(key.trim(), value);
    }
    Ok(context)
}

/// Print the resolved steps of a workflow without running anything
pub fn show(id: String, vars: Vec<String>) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let git = Git::from_current_dir()?;
    let context = build_context(&git, &vars)?;
    let resolved = resolve(&config.workflows, &id, &context)?;

    println!("{}", "Variables:".bold());
    for (key, value) in context.iter() {
        println!("  {key} = {}", value.dimmed());
    }
    println!();
    for line in describe(&resolved) {
        println!("{line}");
    }
    Ok(())
}

/// One line per step, indented by nesting level
pub fn describe(workflow: &ResolvedWorkflow) -> Vec<String> {
    let indent = "  ".repeat(workflow.nesting_level);
    let mut lines = vec![format!("{indent}{}", workflow.name)];
    for step in &workflow.steps {
        let marker = if step.has_unresolved() { "?" } else { "-" };
        match step {
            ResolvedStep::Command { name, command, cwd } => lines.push(format!(
                "{indent}  {marker} {name}: {command} (in {})",
                cwd.as_deref().unwrap_or(".")
            )),
            ResolvedStep::CopyFile { name, from, to } => {
                lines.push(format!("{indent}  {marker} {name}: {from} -> {to}"))
            }
            ResolvedStep::Workflow { workflow, .. } => lines.extend(describe(workflow)),
        }
    }
    lines
}

/// Resolve and run a workflow in the current directory
pub fn run(id: String, vars: Vec<String>, options: RunOptions) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let git = Git::from_current_dir()?;
    let context = build_context(&git, &vars)?;
    let resolved = resolve(&config.workflows, &id, &context)?;

    let prompter = DialoguerPrompter::new();
    match WorkflowRunner::new(&prompter, options).run(&resolved)? {
        RunOutcome::Completed => {}
        RunOutcome::Aborted | RunOutcome::AbortedChain => eprintln!("{}", "Aborted".dimmed()),
    }
    Ok(())
}
