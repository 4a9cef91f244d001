//! Workflow definitions as they appear in the config file

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::WorkflowError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Ask which steps to run before running any
    #[serde(default)]
    pub confirm: bool,
    /// Base directory for the steps
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Workflow {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn matches(&self, id_or_alias: &str) -> bool {
        self.id == id_or_alias || self.aliases.iter().any(|a| a == id_or_alias)
    }
}

/// One step of a workflow.
///
/// On disk the shape is picked by which keys are present: `command`,
/// `copy_from` + `to`, or `workflow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Command {
        command: String,
        #[serde(default)]
        cwd: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    CopyFile {
        copy_from: String,
        to: String,
        #[serde(default)]
        name: Option<String>,
    },
    Workflow {
        workflow: String,
        #[serde(default)]
        cwd: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

/// All configured workflows, addressable by id or alias
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowSet {
    workflows: Vec<Workflow>,
}

impl WorkflowSet {
    pub fn new(workflows: Vec<Workflow>) -> Self {
        Self { workflows }
    }

    pub fn get(&self, id_or_alias: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.matches(id_or_alias))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workflow> {
        self.workflows.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    /// Check ids, aliases and step references, and reject cycles
    pub fn validate(&self) -> Result<(), WorkflowError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for workflow in &self.workflows {
            if workflow.id.is_empty() {
                return Err(WorkflowError::EmptyId);
            }
            for key in std::iter::once(&workflow.id).chain(&workflow.aliases) {
                if key.chars().any(char::is_whitespace) {
                    return Err(WorkflowError::InvalidId(key.clone()));
                }
                if !seen.insert(key.as_str()) {
                    return Err(WorkflowError::Duplicate(key.clone()));
                }
            }
        }

        for workflow in &self.workflows {
            for step in &workflow.steps {
                if let Step::Workflow { workflow: target, .. } = step {
                    if self.get(target).is_none() {
                        return Err(WorkflowError::UnknownStepTarget {
                            workflow: workflow.id.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        let mut finished: HashSet<&str> = HashSet::new();
        for workflow in &self.workflows {
            let mut path = Vec::new();
            self.check_cycles(workflow, &mut path, &mut finished)?;
        }
        Ok(())
    }

    fn check_cycles<'a>(
        &'a self,
        workflow: &'a Workflow,
        path: &mut Vec<&'a str>,
        finished: &mut HashSet<&'a str>,
    ) -> Result<(), WorkflowError> {
        if finished.contains(workflow.id.as_str()) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|id| *id == workflow.id) {
            let mut chain: Vec<String> = path[start..].iter().map(|s| s.to_string()).collect();
            chain.push(workflow.id.clone());
            return Err(WorkflowError::Cycle { chain });
        }
        path.push(&workflow.id);
        for step in &workflow.steps {
            if let Step::Workflow { workflow: target, .. } = step {
                if let Some(nested) = self.get(target) {
                    self.check_cycles(nested, path, finished)?;
                }
            }
        }
        path.pop();
        finished.insert(&workflow.id);
        Ok(())
    }
}
