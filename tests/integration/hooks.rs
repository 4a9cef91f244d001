//! Hook workflows around opening a worktree

use std::path::Path;
use twig::git::Git;
use twig::prompt::{Answer, ScriptedPrompter};
use twig::selection::{BranchSelection, SwitchOptions, Switcher};

use super::helpers::{config, init_test_repo, log_lines, logging_dispatcher};

fn hook_config(repo: &Path, log: &Path, confirm_before_open: bool) -> String {
    format!(
        r#"
[[workflows]]
id = "created"
steps = [{{ command = "echo created >> '{log}'" }}]

[[workflows]]
id = "before"
confirm = {confirm_before_open}
steps = [{{ command = "echo before >> '{log}'" }}]

[[workflows]]
id = "env"
steps = [{{ copy_from = "${{repoRoot}}/README.md", to = "${{newWorktreeRoot}}/copied.md" }}]

[[projects]]
path = "{repo}"
[projects.hooks]
on_create = "created"
before_open = "before"
on_checkout = "env"
"#,
        log = log.display(),
        repo = repo.display(),
    )
}

fn options(reuse_window: bool) -> SwitchOptions {
    SwitchOptions {
        allow_new_branch: true,
        reuse_window,
        open: true,
        ..SwitchOptions::default()
    }
}

#[test]
fn test_new_window_opens_before_creation_hook() {
    let (temp_dir, repo) = init_test_repo();
    let log = temp_dir.path().join("order.log");
    let settings = config(&hook_config(&repo, &log, false));
    let accessor = Git::new(&repo);
    let prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
    let opener = logging_dispatcher(&log);

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let outcome = switcher
        .switch_to(&BranchSelection::New("feature/x".into()), &options(false))
        .unwrap()
        .unwrap();

    assert_eq!(
        log_lines(&log),
        vec![
            "before".to_string(),
            format!("open {}", outcome.worktree.directory.display()),
            "created".to_string(),
        ]
    );
}

#[test]
fn test_reused_window_runs_creation_hook_first() {
    let (temp_dir, repo) = init_test_repo();
    let log = temp_dir.path().join("order.log");
    let settings = config(&hook_config(&repo, &log, false));
    let accessor = Git::new(&repo);
    let prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
    let opener = logging_dispatcher(&log);

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let outcome = switcher
        .switch_to(&BranchSelection::New("feature/x".into()), &options(true))
        .unwrap()
        .unwrap();

    assert_eq!(
        log_lines(&log),
        vec![
            "created".to_string(),
            "before".to_string(),
            format!("open {}", outcome.worktree.directory.display()),
        ]
    );
}

#[test]
fn test_aborted_before_open_hook_skips_opening() {
    let (temp_dir, repo) = init_test_repo();
    let log = temp_dir.path().join("order.log");
    let settings = config(&hook_config(&repo, &log, true));
    let accessor = Git::new(&repo);
    let prompter = ScriptedPrompter::new([Answer::Confirm(true), Answer::SelectMultiple(None)]);
    let opener = logging_dispatcher(&log);

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let outcome = switcher
        .switch_to(&BranchSelection::New("feature/x".into()), &options(false))
        .unwrap()
        .unwrap();

    assert!(!outcome.opened);
    assert!(log_lines(&log).is_empty());
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_skip_hooks_only_opens() {
    let (temp_dir, repo) = init_test_repo();
    let log = temp_dir.path().join("order.log");
    let settings = config(&hook_config(&repo, &log, true));
    let accessor = Git::new(&repo);
    let prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
    let opener = logging_dispatcher(&log);

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let skip = SwitchOptions {
        skip_hooks: true,
        ..options(false)
    };
    let outcome = switcher
        .switch_to(&BranchSelection::New("feature/x".into()), &skip)
        .unwrap()
        .unwrap();

    assert_eq!(
        log_lines(&log),
        vec![format!("open {}", outcome.worktree.directory.display())]
    );
}

#[test]
fn test_checkout_hook_sees_new_worktree_root() {
    let (temp_dir, repo) = init_test_repo();
    let spare = temp_dir.path().join("spare");
    super::helpers::git(&["worktree", "add", "-b", "old", &spare.display().to_string()], &repo);
    super::helpers::git(&["branch", "feature/y"], &repo);

    let log = temp_dir.path().join("order.log");
    let settings = config(&hook_config(&repo, &log, false));
    let accessor = Git::new(&repo);
    let prompter = ScriptedPrompter::new([]);
    let opener = logging_dispatcher(&log);

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let no_open = SwitchOptions {
        open: false,
        skip_hooks: false,
        ..options(false)
    };
    switcher
        .switch_to(&BranchSelection::Existing("feature/y".into()), &no_open)
        .unwrap()
        .unwrap();

    let copied = std::fs::read_to_string(spare.join("copied.md")).unwrap();
    assert_eq!(copied, "# Test Repository\n");
    assert_eq!(log_lines(&log), vec!["before".to_string()]);
}
