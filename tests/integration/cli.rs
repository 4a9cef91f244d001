//! The twig binary end to end

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

use super::helpers::{git, init_test_repo};

fn twig(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_twig"))
        .args(args)
        .current_dir(dir)
        .env("TWIG_CONFIG", dir.join("no-such-config.toml"))
        .env_remove("TWIG_LOG")
        .output()
        .expect("Failed to run twig")
}

#[test]
fn test_worktree_list_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = twig(&["worktree", "list"], temp_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn test_worktree_list_shows_branches() {
    let (temp_dir, repo) = init_test_repo();
    let extra = temp_dir.path().join("extra");
    git(&["worktree", "add", "-b", "feature/z", &extra.display().to_string()], &repo);

    let output = twig(&["worktree", "list"], &repo);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("main"));
    assert!(stdout.contains("feature/z"));
    assert!(stdout.contains("extra"));
}

#[test]
fn test_worktree_remove_deletes_merged_branch() {
    let (temp_dir, repo) = init_test_repo();
    let extra = temp_dir.path().join("extra");
    git(&["worktree", "add", "-b", "feature/z", &extra.display().to_string()], &repo);

    let output = twig(&["worktree", "remove", "feature/z"], &repo);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(!extra.exists());
    assert!(!git(&["branch", "--list"], &repo).contains("feature/z"));
}

#[test]
fn test_worktree_remove_refuses_main() {
    let (_temp_dir, repo) = init_test_repo();
    let output = twig(&["worktree", "remove", "main"], &repo);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_completions() {
    let temp_dir = TempDir::new().unwrap();

    let output = twig(&["completions", "bash"], temp_dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("twig"));

    let output = twig(&["completions", "powershell"], temp_dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported shell"));
}

#[test]
fn test_workflow_list_without_config() {
    let temp_dir = TempDir::new().unwrap();
    let output = twig(&["workflow", "list"], temp_dir.path());
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No workflows configured"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");
    std::fs::write(&config, "[[workflows]]\nid = \"a b\"\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_twig"))
        .args(["workflow", "list"])
        .current_dir(temp_dir.path())
        .env("TWIG_CONFIG", &config)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("whitespace"));
}

#[test]
fn test_do_no_open_prints_only_the_path() {
    let (_temp_dir, repo) = init_test_repo();
    git(&["branch", "topic"], &repo);

    let output = twig(&["do", "topic", "--no-open", "--no-fetch"], &repo);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let expected = repo.parent().unwrap().join("repo.worktrees").join("1");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), expected.display().to_string());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Created worktree"));
}
