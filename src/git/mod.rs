//! Git operations for twig worktree management
//!
//! This module provides:
//! - Classification of git failures into known kinds
//! - Worktree listing, creation and removal
//! - Branch management and working tree status
//! - The [`Git`] accessor that binds these to a working directory

pub mod branch;
pub mod errors;
pub mod repo;
pub mod runner;
pub mod worktree;

pub use errors::{classify, run_guarded, ClassifiedError, GitError, GitErrorKind};
pub use repo::Git;
pub use worktree::Worktree;

/// Initialize git module - check prerequisites
pub fn init() -> anyhow::Result<()> {
    worktree::check_worktree_support()
}
