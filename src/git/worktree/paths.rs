//! Path resolution utilities for worktrees

use std::fs;
use std::path::{Path, PathBuf};

use super::parser::Worktree;
use crate::git::runner::run_git_checked;

/// Find the main repository root from any path within a worktree or the main repo.
///
/// Resolves `git rev-parse --git-dir` against `cwd`; linked worktrees point
/// at the shared git dir through their `commondir` file. Returns `None`
/// outside a repository.
pub fn repo_root_dir(cwd: &Path) -> Option<PathBuf> {
    let git_dir = run_git_checked(&["rev-parse", "--git-dir"], cwd).ok()?;
    let git_dir = absolutize(cwd, Path::new(&git_dir));

    let common_dir = match fs::read_to_string(git_dir.join("commondir")) {
        Ok(relative) => absolutize(&git_dir, Path::new(relative.trim())),
        Err(_) => git_dir,
    };
    let common_dir = common_dir.canonicalize().unwrap_or(common_dir);

    if common_dir.file_name().is_some_and(|name| name == ".git") {
        common_dir.parent().map(Path::to_path_buf)
    } else {
        // bare repository
        Some(common_dir)
    }
}

/// Top-level directory of the worktree containing `cwd`
pub fn worktree_root_dir(cwd: &Path) -> Option<PathBuf> {
    run_git_checked(&["rev-parse", "--show-toplevel"], cwd)
        .ok()
        .map(PathBuf::from)
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Folder name of the repository root
pub fn repo_folder_name(repo_root: &Path) -> String {
    repo_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "repo".to_string())
}

/// Directory that holds new worktrees.
///
/// Defaults to a sibling of the repository: `<parent>/<repo>.worktrees`.
pub fn worktrees_base_dir(repo_root: &Path, configured: Option<&Path>) -> PathBuf {
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }
    let folder = format!("{}.worktrees", repo_folder_name(repo_root));
    match repo_root.parent() {
        Some(parent) => parent.join(folder),
        None => repo_root.join(folder),
    }
}

/// Next free sequential worktree name: `1`, `2`, ... or `<prefix>-1`, ...
///
/// A name is taken when an existing worktree directory carries it or a path
/// with that name already exists under `base_dir`.
pub fn next_worktree_name(existing: &[Worktree], base_dir: &Path, prefix: Option<&str>) -> String {
    let taken: Vec<String> = existing.iter().map(Worktree::name).collect();

    (1u32..)
        .map(|n| match prefix {
            Some(p) => format!("{p}-{n}"),
            None => n.to_string(),
        })
        .find(|name| !taken.contains(name) && !base_dir.join(name).exists())
        .unwrap_or_else(|| "worktree".to_string())
}
