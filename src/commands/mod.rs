pub mod checks;
pub mod do_cmd;
pub mod open_cmd;
pub mod workflow_cmd;
pub mod worktree_cmd;
