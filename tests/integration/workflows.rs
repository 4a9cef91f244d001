//! Resolving and running workflows from config text

use std::fs;
use tempfile::TempDir;
use twig::context::{CliContext, ContextVar};
use twig::prompt::{Answer, ScriptedPrompter};
use twig::workflow::{resolve, RunOptions, RunOutcome, WorkflowError, WorkflowRunner};

use super::helpers::config;

fn setup_config() -> twig::config::Config {
    config(
        r#"
[[workflows]]
id = "setup"
aliases = ["s"]
cwd = "${newWorktreeRoot}"
steps = [
  { command = "echo ok > marker.txt" },
  { copy_from = "${repoRoot}/.env", to = ".env" },
  { workflow = "nested", cwd = "sub" },
]

[[workflows]]
id = "nested"
steps = [{ command = "pwd > where.txt", name = "Record directory" }]
"#,
    )
}

#[test]
fn test_runs_steps_relative_to_worktree() {
    let repo = TempDir::new().unwrap();
    let worktree = TempDir::new().unwrap();
    fs::write(repo.path().join(".env"), "TOKEN=1\n").unwrap();
    fs::create_dir(worktree.path().join("sub")).unwrap();

    let mut context = CliContext::new();
    context.set_path(ContextVar::RepoRoot, repo.path());
    context.set_path(ContextVar::NewWorktreeRoot, worktree.path());

    let resolved = resolve(&setup_config().workflows, "s", &context).unwrap();
    assert_eq!(resolved.id, "setup");

    let prompter = ScriptedPrompter::new([]);
    let outcome = WorkflowRunner::new(&prompter, RunOptions::default())
        .run(&resolved)
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(fs::read_to_string(worktree.path().join("marker.txt")).unwrap(), "ok\n");
    assert_eq!(fs::read_to_string(worktree.path().join(".env")).unwrap(), "TOKEN=1\n");
    let recorded = fs::read_to_string(worktree.path().join("sub/where.txt")).unwrap();
    assert_eq!(
        fs::canonicalize(recorded.trim()).unwrap(),
        fs::canonicalize(worktree.path().join("sub")).unwrap()
    );
}

#[test]
fn test_missing_variable_can_be_skipped() {
    let worktree = TempDir::new().unwrap();
    fs::create_dir(worktree.path().join("sub")).unwrap();
    let mut context = CliContext::new();
    context.set_path(ContextVar::NewWorktreeRoot, worktree.path());

    let resolved = resolve(&setup_config().workflows, "setup", &context).unwrap();
    let prompter = ScriptedPrompter::new([Answer::Choose("Skip".into())]);
    let outcome = WorkflowRunner::new(&prompter, RunOptions::default())
        .run(&resolved)
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert!(!worktree.path().join(".env").exists());
    assert!(worktree.path().join("marker.txt").exists());
}

#[test]
fn test_failing_step_stops_unless_continuing() {
    let dir = TempDir::new().unwrap();
    let settings = config(
        r#"
[[workflows]]
id = "flaky"
cwd = "${cwd}"
steps = [{ command = "exit 3" }, { command = "touch after" }]
"#,
    );
    let mut context = CliContext::new();
    context.set_path(ContextVar::Cwd, dir.path());
    let resolved = resolve(&settings.workflows, "flaky", &context).unwrap();
    let prompter = ScriptedPrompter::new([]);

    let err = WorkflowRunner::new(&prompter, RunOptions::default())
        .run(&resolved)
        .unwrap_err();
    assert!(err.to_string().contains("failed"));
    assert!(!dir.path().join("after").exists());

    let continuing = RunOptions {
        continue_on_error: true,
        ..RunOptions::default()
    };
    let outcome = WorkflowRunner::new(&prompter, continuing).run(&resolved).unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    assert!(dir.path().join("after").exists());
}

#[test]
fn test_unknown_workflow() {
    let err = resolve(&setup_config().workflows, "deploy", &CliContext::new()).unwrap_err();
    assert!(matches!(err, WorkflowError::UnknownWorkflow(id) if id == "deploy"));
}
