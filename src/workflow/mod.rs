//! Workflows: ordered steps run around worktree operations
//!
//! ## Module structure
//!
//! - `model`: definitions as read from the config file, id/alias lookup
//! - `resolve`: interpolation and nesting into a [`ResolvedWorkflow`] tree
//! - `runner`: step execution with confirmation and abort semantics

mod model;
mod resolve;
mod runner;

pub use model::{Step, Workflow, WorkflowSet};
pub use resolve::{resolve, ResolvedStep, ResolvedWorkflow};
pub use runner::{RunOptions, RunOutcome, StepDecision, WorkflowRunner};

use thiserror::Error;

/// Workflow definitions that cannot be used
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("workflow id must not be empty")]
    EmptyId,

    #[error("workflow id or alias '{0}' must not contain whitespace")]
    InvalidId(String),

    #[error("workflow id or alias '{0}' is defined more than once")]
    Duplicate(String),

    #[error("unknown workflow '{0}'")]
    UnknownWorkflow(String),

    #[error("workflow '{workflow}' runs unknown workflow '{target}'")]
    UnknownStepTarget { workflow: String, target: String },

    #[error("workflow cycle: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },
}
