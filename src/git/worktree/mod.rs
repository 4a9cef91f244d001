//! Git worktree management
//!
//! New worktrees live next to the repository, in `<repo>.worktrees/<name>`.
//!
//! ## Module structure
//!
//! - `checks`: Validation checks (git availability, worktree support)
//! - `operations`: list, add, remove, prune
//! - `parser`: `git worktree list --porcelain` parsing
//! - `paths`: repository roots and default worktree naming

mod checks;
mod operations;
mod parser;
mod paths;

pub use checks::{check_git_available, check_worktree_support};
pub use operations::{add_worktree, list_worktrees, prune_worktrees, remove_worktree};
pub use parser::{parse_worktree_list, Worktree};
pub use paths::{
    next_worktree_name, repo_folder_name, repo_root_dir, worktree_root_dir, worktrees_base_dir,
};
