//! Shared helpers for unit tests that need a real git repository

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub fn git(args: &[&str], dir: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run git {}: {e}", args.join(" ")));
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn init_repo_at(repo_root: &Path) {
    git(&["init"], repo_root);
    git(&["config", "user.email", "test@test.com"], repo_root);
    git(&["config", "user.name", "Test User"], repo_root);
    git(&["config", "commit.gpgsign", "false"], repo_root);
    fs::write(repo_root.join("README.md"), "# Test Repository\n").expect("Failed to write README.md");
    git(&["add", "."], repo_root);
    git(&["commit", "-m", "Initial commit"], repo_root);
    git(&["branch", "-M", "main"], repo_root);
}

/// Temporary repository with one commit on `main`, rooted at the temp dir
pub fn init_test_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    init_repo_at(temp_dir.path());
    temp_dir
}

/// Temporary repository at `<tmp>/repo`, so sibling worktree folders stay
/// inside the temp dir. The returned path is canonical.
pub fn init_nested_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo_root = temp_dir.path().join("repo");
    fs::create_dir(&repo_root).expect("Failed to create repo directory");
    init_repo_at(&repo_root);
    let repo_root = canonical(&repo_root);
    (temp_dir, repo_root)
}

pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
