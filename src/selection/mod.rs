//! Deciding which worktree a branch is worked on in
//!
//! ## Module structure
//!
//! - `candidate`: the clean worktree that may be reused
//! - `controller`: reuse-or-create, including branch creation
//! - `input`: branch names, PR numbers and PR URLs
//! - `switch`: the full flow with hooks and opening

mod candidate;
mod controller;
mod input;
mod switch;

pub use candidate::{find_reuse_candidate, is_reusable, pick_reuse_candidate, Candidate};
pub use controller::{WorktreeChoice, WorktreeController};
pub use input::{lookup_branch, resolve_input, BranchSelection};
pub use switch::{SwitchOptions, SwitchOutcome, Switcher};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("branch '{branch}' is already checked out in {}", directory.display())]
    BranchCheckedOut { branch: String, directory: PathBuf },
}
