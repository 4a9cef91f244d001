//! Execution of resolved workflows

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::Command;

use super::resolve::{ResolvedStep, ResolvedWorkflow};
use crate::interpolate::unresolved_names;
use crate::prompt::Prompter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Skip the step selection prompt of confirm-gated workflows
    pub auto_confirm: bool,
    /// Keep going after a failing step
    pub continue_on_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// This workflow stopped; an enclosing workflow carries on
    Aborted,
    /// Every enclosing workflow stops as well
    AbortedChain,
}

/// What to do with a step that still references unavailable variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    Skip,
    Abort,
    AbortChain,
    Continue,
}

impl StepDecision {
    fn label(&self) -> &'static str {
        match self {
            Self::Skip => "Skip this step",
            Self::Abort => "Abort this workflow",
            Self::AbortChain => "Abort the entire workflow chain",
            Self::Continue => "Continue anyway (risky)",
        }
    }
}

pub struct WorkflowRunner<'a> {
    prompter: &'a dyn Prompter,
    options: RunOptions,
}

impl<'a> WorkflowRunner<'a> {
    pub fn new(prompter: &'a dyn Prompter, options: RunOptions) -> Self {
        Self { prompter, options }
    }

    pub fn run(&self, workflow: &ResolvedWorkflow) -> Result<RunOutcome> {
        let indent = "  ".repeat(workflow.nesting_level);
        eprintln!("{indent}{} {}", "Workflow".bold(), workflow.name.cyan());

        let Some(selected) = self.select_steps(workflow)? else {
            eprintln!("{indent}{}", "Nothing to run".dimmed());
            return Ok(RunOutcome::Aborted);
        };

        for index in selected {
            let step = &workflow.steps[index];
            eprintln!("{indent}{} {}", "→".cyan(), step.name());

            if step.has_unresolved() {
                match self.ask_unresolved(step, workflow.nesting_level)? {
                    StepDecision::Skip => {
                        eprintln!("{indent}  {}", "skipped".dimmed());
                        continue;
                    }
                    StepDecision::Abort => return Ok(RunOutcome::Aborted),
                    StepDecision::AbortChain => return Ok(RunOutcome::AbortedChain),
                    StepDecision::Continue => {}
                }
            }

            match step {
                ResolvedStep::Command { name, command, cwd } => {
                    self.run_command(name, command, cwd.as_deref())?
                }
                ResolvedStep::CopyFile { name, from, to } => self.copy_file(name, from, to)?,
                ResolvedStep::Workflow { workflow, .. } => {
                    if self.run(workflow)? == RunOutcome::AbortedChain {
                        return Ok(RunOutcome::AbortedChain);
                    }
                }
            }
        }

        eprintln!("{indent}{} {}", "✓".green().bold(), workflow.name);
        Ok(RunOutcome::Completed)
    }

    /// Indices of the steps to run, `None` when nothing should run
    fn select_steps(&self, workflow: &ResolvedWorkflow) -> Result<Option<Vec<usize>>> {
        let all: Vec<usize> = (0..workflow.steps.len()).collect();
        if !workflow.confirm || self.options.auto_confirm {
            return Ok(Some(all));
        }

        let names: Vec<String> = workflow.steps.iter().map(|s| s.name().to_string()).collect();
        let defaults = vec![true; names.len()];
        let message = format!("Steps of `{}` to run", workflow.name);
        match self.prompter.select_multiple(&message, &names, &defaults)? {
            Some(selected) => {
                let selected = normalize_selection(selected, workflow.steps.len())?;
                Ok((!selected.is_empty()).then_some(selected))
            }
            None => Ok(None),
        }
    }

    fn ask_unresolved(&self, step: &ResolvedStep, nesting_level: usize) -> Result<StepDecision> {
        let text = match step {
            ResolvedStep::Command { command, cwd, .. } => {
                format!("{command} {}", cwd.as_deref().unwrap_or_default())
            }
            ResolvedStep::CopyFile { from, to, .. } => format!("{from} {to}"),
            ResolvedStep::Workflow { .. } => String::new(),
        };
        let missing = unresolved_names(&text).join(", ");

        let mut decisions = vec![StepDecision::Skip, StepDecision::Abort];
        if nesting_level > 0 {
            decisions.push(StepDecision::AbortChain);
        }
        decisions.push(StepDecision::Continue);
        let labels: Vec<String> = decisions.iter().map(|d| d.label().to_string()).collect();

        let message = format!(
            "Step {} uses variables that are not available here ({missing})",
            step.name()
        );
        Ok(match self.prompter.select(&message, &labels)? {
            Some(index) => match decisions.get(index) {
                Some(decision) => *decision,
                None => bail!("Choice {index} is out of range"),
            },
            None => StepDecision::Abort,
        })
    }

    fn run_command(&self, name: &str, command: &str, cwd: Option<&str>) -> Result<()> {
        tracing::debug!(command, cwd = cwd.unwrap_or("."), "running workflow command");
        let mut process = Command::new("sh");
        process.arg("-c").arg(command);
        if let Some(dir) = cwd {
            process.current_dir(dir);
        }
        let status = process
            .status()
            .with_context(|| format!("Failed to run `{command}`"))?;
        if status.success() {
            return Ok(());
        }
        if self.options.continue_on_error {
            tracing::warn!(step = name, %status, "workflow step failed, continuing");
            eprintln!("  {} {name} ({status})", "failed:".yellow());
            return Ok(());
        }
        bail!("Step {name} failed ({status})")
    }

    fn copy_file(&self, name: &str, from: &str, to: &str) -> Result<()> {
        let result = copy_overwriting(Path::new(from), Path::new(to));
        match result {
            Err(err) if self.options.continue_on_error => {
                tracing::warn!(step = name, error = %format!("{err:#}"), "copy failed, continuing");
                eprintln!("  {} {name}", "failed:".yellow());
                Ok(())
            }
            other => other,
        }
    }
}

fn copy_overwriting(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    Ok(())
}

/// Selected step indices in declaration order, each once
fn normalize_selection(mut selected: Vec<usize>, step_count: usize) -> Result<Vec<usize>> {
    selected.sort_unstable();
    selected.dedup();
    if let Some(index) = selected.iter().find(|&&index| index >= step_count) {
        bail!("Step {index} is out of range, the workflow has {step_count} step(s)");
    }
    Ok(selected)
}
