//! Turn a configured workflow into an executable tree
//!
//! Resolution interpolates every path and command against the
//! [`CliContext`], fixes each step's working directory and display name, and
//! expands nested workflows. It touches nothing on disk and is
//! deterministic for a given set and context.

use std::path::Path;

use super::model::{Step, Workflow, WorkflowSet};
use super::WorkflowError;
use crate::context::{CliContext, ContextVar};
use crate::interpolate::{contains_sentinel, interpolate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWorkflow {
    pub id: String,
    pub name: String,
    pub confirm: bool,
    /// 0 for the workflow that was asked for, +1 per level of nesting
    pub nesting_level: usize,
    pub steps: Vec<ResolvedStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedStep {
    Command {
        name: String,
        command: String,
        cwd: Option<String>,
    },
    CopyFile {
        name: String,
        from: String,
        to: String,
    },
    Workflow {
        name: String,
        workflow: Box<ResolvedWorkflow>,
    },
}

impl ResolvedStep {
    pub fn name(&self) -> &str {
        match self {
            Self::Command { name, .. } | Self::CopyFile { name, .. } | Self::Workflow { name, .. } => {
                name
            }
        }
    }

    /// Whether the text this step would execute still holds an unresolved variable
    pub fn has_unresolved(&self) -> bool {
        match self {
            Self::Command { command, cwd, .. } => {
                contains_sentinel(command) || cwd.as_deref().is_some_and(contains_sentinel)
            }
            Self::CopyFile { from, to, .. } => contains_sentinel(from) || contains_sentinel(to),
            Self::Workflow { .. } => false,
        }
    }
}

/// Resolve the workflow with the given id or alias
pub fn resolve(
    set: &WorkflowSet,
    id_or_alias: &str,
    context: &CliContext,
) -> Result<ResolvedWorkflow, WorkflowError> {
    let workflow = set
        .get(id_or_alias)
        .ok_or_else(|| WorkflowError::UnknownWorkflow(id_or_alias.to_string()))?;
    let mut path = Vec::new();
    Resolver { set, context }.resolve(workflow, None, None, 0, &mut path)
}

struct Resolver<'a> {
    set: &'a WorkflowSet,
    context: &'a CliContext,
}

impl Resolver<'_> {
    fn resolve(
        &self,
        workflow: &Workflow,
        including_cwd: Option<String>,
        parent_base: Option<String>,
        nesting_level: usize,
        path: &mut Vec<String>,
    ) -> Result<ResolvedWorkflow, WorkflowError> {
        if let Some(start) = path.iter().position(|id| *id == workflow.id) {
            let mut chain = path[start..].to_vec();
            chain.push(workflow.id.clone());
            return Err(WorkflowError::Cycle { chain });
        }
        path.push(workflow.id.clone());

        let own_cwd = workflow.cwd.as_deref().map(|c| self.interpolate(c));
        let base = including_cwd.or(own_cwd).or(parent_base);

        let mut steps = Vec::with_capacity(workflow.steps.len());
        for step in &workflow.steps {
            steps.push(self.resolve_step(step, base.as_deref(), nesting_level, path)?);
        }

        path.pop();
        Ok(ResolvedWorkflow {
            id: workflow.id.clone(),
            name: workflow.display_name().to_string(),
            confirm: workflow.confirm,
            nesting_level,
            steps,
        })
    }

    fn resolve_step(
        &self,
        step: &Step,
        base: Option<&str>,
        nesting_level: usize,
        path: &mut Vec<String>,
    ) -> Result<ResolvedStep, WorkflowError> {
        match step {
            Step::Command { command, cwd, name } => {
                let command = self.interpolate(command);
                let cwd = match cwd {
                    Some(cwd) => Some(join(base, &self.interpolate(cwd))),
                    None => base.map(str::to_string),
                };
                let name = name.clone().unwrap_or_else(|| {
                    format!("`{command}` in `{}`", self.display_dir(cwd.as_deref()))
                });
                Ok(ResolvedStep::Command { name, command, cwd })
            }
            Step::CopyFile {
                copy_from,
                to,
                name,
            } => {
                let from = join(base, &self.interpolate(copy_from));
                let to = join(base, &self.interpolate(to));
                let name = name
                    .clone()
                    .unwrap_or_else(|| format!("Copy file from `{from}` to `{to}`"));
                Ok(ResolvedStep::CopyFile { name, from, to })
            }
            Step::Workflow {
                workflow: target,
                cwd,
                name,
            } => {
                let nested = self.set.get(target).ok_or_else(|| WorkflowError::UnknownStepTarget {
                    workflow: path.last().cloned().unwrap_or_default(),
                    target: target.clone(),
                })?;
                let including_cwd = cwd.as_deref().map(|c| join(base, &self.interpolate(c)));
                let resolved = self.resolve(
                    nested,
                    including_cwd,
                    base.map(str::to_string),
                    nesting_level + 1,
                    path,
                )?;
                let name = name
                    .clone()
                    .unwrap_or_else(|| format!("Run workflow `{}`", resolved.name));
                Ok(ResolvedStep::Workflow {
                    name,
                    workflow: Box::new(resolved),
                })
            }
        }
    }

    fn interpolate(&self, text: &str) -> String {
        interpolate(text, self.context)
    }

    /// Directory shown in default step names, relative to where twig was started
    fn display_dir(&self, dir: Option<&str>) -> String {
        let Some(dir) = dir else {
            return ".".to_string();
        };
        if contains_sentinel(dir) {
            return dir.to_string();
        }
        let Some(cwd) = self.context.var(ContextVar::Cwd) else {
            return dir.to_string();
        };
        match Path::new(dir).strip_prefix(cwd) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel.display().to_string(),
            Err(_) => dir.to_string(),
        }
    }
}

/// `path` on top of `base`; absolute paths and sentinels are kept as they are
fn join(base: Option<&str>, path: &str) -> String {
    match base {
        Some(base) if !contains_sentinel(path) => Path::new(base).join(path).display().to_string(),
        _ => path.to_string(),
    }
}
