//! Worktree selection against real repositories

use tempfile::TempDir;
use twig::commands::do_cmd::{self, DoArgs};
use twig::config::{HookPoint, WorktreesConfig};
use twig::git::Git;
use twig::prompt::{Answer, ScriptedPrompter};
use twig::selection::{BranchSelection, SelectionError, SwitchOptions, Switcher, WorktreeController};

use super::helpers::{config, git, init_test_repo, log_lines, logging_dispatcher, worktree_count};

fn no_open() -> SwitchOptions {
    SwitchOptions {
        allow_new_branch: true,
        ..SwitchOptions::default()
    }
}

#[test]
fn test_new_branch_gets_new_worktree_at_default_path() {
    let (temp_dir, repo) = init_test_repo();
    let accessor = Git::new(&repo);
    let settings = config("");
    let prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let outcome = switcher
        .switch_to(&BranchSelection::New("feature/x".into()), &no_open())
        .unwrap()
        .expect("switch should not abort");

    assert!(outcome.is_branch_new);
    assert!(outcome.is_worktree_new);
    assert_eq!(outcome.hook, HookPoint::OnCreate);
    assert_eq!(
        outcome.worktree.directory,
        temp_dir.path().canonicalize().unwrap().join("repo.worktrees").join("1")
    );
    assert_eq!(outcome.worktree.branch.as_deref(), Some("feature/x"));
    assert_eq!(
        prompter.asked(),
        vec!["Branch feature/x does not exist. Create it from main?"]
    );
    assert_eq!(worktree_count(&repo), 2);
}

#[test]
fn test_declining_new_branch_adds_nothing() {
    let (temp_dir, repo) = init_test_repo();
    let accessor = Git::new(&repo);
    let settings = config("");
    let prompter = ScriptedPrompter::new([Answer::Confirm(false)]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let outcome = switcher
        .switch_to(&BranchSelection::New("feature/x".into()), &no_open())
        .unwrap();

    assert!(outcome.is_none());
    assert_eq!(worktree_count(&repo), 1);
    assert!(!git(&["branch", "--list"], &repo).contains("feature/x"));
}

#[test]
fn test_new_branch_not_allowed_is_quiet_abort() {
    let (temp_dir, repo) = init_test_repo();
    let accessor = Git::new(&repo);
    let settings = config("");
    let prompter = ScriptedPrompter::new([]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let options = SwitchOptions::default();
    let outcome = switcher
        .switch_to(&BranchSelection::New("feature/x".into()), &options)
        .unwrap();

    assert!(outcome.is_none());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_checked_out_branch_is_refused_without_adding_worktree() {
    let (_temp_dir, repo) = init_test_repo();
    let accessor = Git::new(&repo);
    let settings = WorktreesConfig::default();
    let prompter = ScriptedPrompter::new([]);

    let controller = WorktreeController::new(&accessor, &prompter, &settings);
    let err = controller
        .choose_or_create_worktree("main", true)
        .unwrap_err();

    match err.downcast_ref::<SelectionError>() {
        Some(SelectionError::BranchCheckedOut { branch, directory }) => {
            assert_eq!(branch, "main");
            assert_eq!(directory, &repo);
        }
        other => panic!("expected BranchCheckedOut, got {other:?}"),
    }
    assert_eq!(worktree_count(&repo), 1);
}

#[test]
fn test_switch_to_checked_out_branch_uses_its_worktree() {
    let (temp_dir, repo) = init_test_repo();
    let accessor = Git::new(&repo);
    let settings = config("");
    let prompter = ScriptedPrompter::new([]);
    let log = temp_dir.path().join("open.log");
    let opener = logging_dispatcher(&log);

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let options = SwitchOptions {
        open: true,
        ..SwitchOptions::default()
    };
    let outcome = switcher
        .switch_to(&BranchSelection::Existing("main".into()), &options)
        .unwrap()
        .unwrap();

    assert_eq!(outcome.hook, HookPoint::OnSwitch);
    assert_eq!(outcome.worktree.directory, repo);
    assert!(outcome.opened);
    assert_eq!(log_lines(&log), vec![format!("open {}", repo.display())]);
}

#[test]
fn test_clean_worktree_is_reused() {
    let (temp_dir, repo) = init_test_repo();
    let spare = temp_dir.path().join("spare");
    git(&["worktree", "add", "-b", "old", &spare.display().to_string()], &repo);
    git(&["branch", "feature/y"], &repo);

    let accessor = Git::new(&repo);
    let settings = config("");
    let prompter = ScriptedPrompter::new([]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let outcome = switcher
        .switch_to(&BranchSelection::Existing("feature/y".into()), &no_open())
        .unwrap()
        .unwrap();

    assert!(!outcome.is_worktree_new);
    assert!(!outcome.is_branch_new);
    assert_eq!(outcome.hook, HookPoint::OnCheckout);
    assert_eq!(outcome.worktree.directory, spare.canonicalize().unwrap());
    assert_eq!(outcome.worktree.branch.as_deref(), Some("feature/y"));
    assert_eq!(worktree_count(&repo), 2);
}

#[test]
fn test_dirty_worktree_is_not_reused() {
    let (temp_dir, repo) = init_test_repo();
    let spare = temp_dir.path().join("spare");
    git(&["worktree", "add", "-b", "old", &spare.display().to_string()], &repo);
    std::fs::write(spare.join("wip.txt"), "unsaved").unwrap();
    git(&["branch", "feature/y"], &repo);

    let accessor = Git::new(&repo);
    let settings = config("");
    let prompter = ScriptedPrompter::new([]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));

    let mut switcher = Switcher::new(&accessor, &settings, &prompter, &opener);
    let outcome = switcher
        .switch_to(&BranchSelection::Existing("feature/y".into()), &no_open())
        .unwrap()
        .unwrap();

    assert!(outcome.is_worktree_new);
    assert_eq!(outcome.hook, HookPoint::OnCreate);
    assert_eq!(worktree_count(&repo), 3);
}

#[test]
fn test_do_resolves_input_and_switches() {
    let (temp_dir, repo) = init_test_repo();
    let accessor = Git::new(&repo);
    let settings = config("");
    let prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));

    let args = DoArgs {
        input: Some("origin/topic".into()),
        switch: no_open(),
        ..DoArgs::default()
    };
    let outcome = do_cmd::run(&accessor, &settings, &prompter, &opener, &args)
        .unwrap()
        .unwrap();

    assert_eq!(outcome.worktree.branch.as_deref(), Some("topic"));
    assert!(outcome.is_branch_new);
}

#[test]
fn test_do_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();
    let accessor = Git::new(temp_dir.path());
    let settings = config("");
    let prompter = ScriptedPrompter::new([]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));

    let args = DoArgs {
        input: Some("main".into()),
        ..DoArgs::default()
    };
    assert!(do_cmd::run(&accessor, &settings, &prompter, &opener, &args).is_err());
    assert!(prompter.asked().is_empty());
}

#[test]
fn test_do_fetches_branch_pushed_after_clone() {
    let (temp_dir, upstream) = init_test_repo();
    let parent = upstream.parent().unwrap();
    let clone = parent.join("clone");
    git(
        &["clone", &upstream.to_string_lossy(), &clone.to_string_lossy()],
        parent,
    );

    git(&["checkout", "-b", "feature/late"], &upstream);
    std::fs::write(upstream.join("late.txt"), "late\n").unwrap();
    git(&["add", "late.txt"], &upstream);
    git(&["commit", "-m", "Late work"], &upstream);
    git(&["checkout", "main"], &upstream);

    let accessor = Git::new(&clone);
    assert!(!accessor.list_branches(true).unwrap().contains(&"feature/late".to_string()));

    let settings = config("");
    let prompter = ScriptedPrompter::new([]);
    let opener = logging_dispatcher(&temp_dir.path().join("open.log"));
    let args = DoArgs {
        input: Some("feature/late".into()),
        fetch: true,
        switch: no_open(),
        ..DoArgs::default()
    };
    let outcome = do_cmd::run(&accessor, &settings, &prompter, &opener, &args)
        .unwrap()
        .expect("remote branch should be checked out");

    assert!(accessor.list_branches(true).unwrap().contains(&"feature/late".to_string()));
    assert_eq!(outcome.worktree.branch.as_deref(), Some("feature/late"));
    assert!(!outcome.is_branch_new);
    assert!(outcome.is_worktree_new);
    assert!(outcome.worktree.directory.join("late.txt").exists());
    assert!(prompter.asked().is_empty());
}
