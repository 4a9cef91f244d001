pub mod commands;
pub mod completions;
pub mod config;
pub mod context;
pub mod git;
pub mod github;
pub mod interpolate;
pub mod logging;
pub mod open;
pub mod prompt;
pub mod selection;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_support;
