pub mod dynamic;
pub mod generator;

pub use dynamic::{complete_branches, complete_dynamic, complete_workflows, CompletionTarget};
pub use generator::{generate_completions, Shell};
