//! Git branch management operations
//!
//! This module provides branch operations organized by concern:
//!
//! - `naming`: ref prefix normalization
//! - `operations`: create, delete, list, checkout, fetch
//! - `status`: working tree status and last-modified timestamps

mod naming;
mod operations;
mod status;

pub use naming::normalize_branch_name;
pub use operations::{
    branch_exists, checkout, create_branch, current_branch, delete_branch, fetch, list_branches,
};
pub use status::{last_modified, status};
