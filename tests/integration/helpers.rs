//! Shared test helpers: temporary repositories and a recording open backend

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use anyhow::Result;
use twig::config::Config;
use twig::open::{OpenBackend, OpenDispatcher, OpenKind, OpenOptions};

/// Run git in `dir`, panicking on failure
pub fn git(args: &[&str], dir: &Path) -> String {
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
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Test helper: Create a temporary git repository at `<tmp>/repo` with an
/// initial commit on `main`. The returned path is canonical.
pub fn init_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo_root = temp_dir.path().join("repo");
    fs::create_dir(&repo_root).expect("Failed to create repo directory");

    git(&["init"], &repo_root);
    git(&["config", "user.email", "test@test.com"], &repo_root);
    git(&["config", "user.name", "Test User"], &repo_root);
    git(&["config", "commit.gpgsign", "false"], &repo_root);
    fs::write(repo_root.join("README.md"), "# Test Repository\n")
        .expect("Failed to write README.md");
    git(&["add", "."], &repo_root);
    git(&["commit", "-m", "Initial commit"], &repo_root);
    git(&["branch", "-M", "main"], &repo_root);

    let repo_root = repo_root.canonicalize().expect("Failed to canonicalize repo");
    (temp_dir, repo_root)
}

/// Number of worktrees git knows about
pub fn worktree_count(repo_root: &Path) -> usize {
    git(&["worktree", "list", "--porcelain"], repo_root)
        .lines()
        .filter(|line| line.starts_with("worktree "))
        .count()
}

/// Config text parsed the way the loader does it
pub fn config(text: &str) -> Config {
    Config::parse(text, Path::new("test-config.toml")).expect("Failed to parse test config")
}

/// Open backend that appends `open <target>` to a log file instead of
/// launching anything
pub struct LoggingBackend {
    pub log: PathBuf,
}

impl OpenBackend for LoggingBackend {
    fn name(&self) -> &str {
        "logging"
    }

    fn is_installed(&self) -> bool {
        true
    }

    fn supports(&self, _kind: OpenKind, _options: &OpenOptions) -> bool {
        true
    }

    fn open(&self, target: &str, _kind: OpenKind, _options: &OpenOptions) -> Result<()> {
        append(&self.log, &format!("open {target}"));
        Ok(())
    }
}

/// Backend that is never a candidate; used as the fallback in tests
pub struct UnavailableBackend;

impl OpenBackend for UnavailableBackend {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_installed(&self) -> bool {
        false
    }

    fn supports(&self, _kind: OpenKind, _options: &OpenOptions) -> bool {
        false
    }

    fn open(&self, _target: &str, _kind: OpenKind, _options: &OpenOptions) -> Result<()> {
        anyhow::bail!("unavailable backend was invoked")
    }
}

pub fn logging_dispatcher(log: &Path) -> OpenDispatcher {
    OpenDispatcher::new(
        vec![Box::new(LoggingBackend {
            log: log.to_path_buf(),
        })],
        Box::new(UnavailableBackend),
    )
}

pub fn append(log: &Path, line: &str) {
    let mut text = fs::read_to_string(log).unwrap_or_default();
    text.push_str(line);
    text.push('\n');
    fs::write(log, text).expect("Failed to write log");
}

pub fn log_lines(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(String::from)
        .collect()
}
