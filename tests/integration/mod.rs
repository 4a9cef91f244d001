//! Integration tests for twig
//!
//! These tests drive the worktree selection flow, hook workflows and the
//! binary itself against temporary git repositories.

pub mod cli;
pub mod helpers;
pub mod hooks;
pub mod selection;
pub mod workflows;
