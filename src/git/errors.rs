//! Classification of git failures
//!
//! git reports most failures only as human-readable stderr text. This module
//! maps the messages the worktree flow cares about onto [`GitErrorKind`] so
//! callers can branch on what went wrong instead of matching strings.
//!
//! The patterns are tied to git's exact wording, which is not a stable
//! interface. Keep them here and nowhere else.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Known git failure reasons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitErrorKind {
    /// `fatal: not a git repository ...`
    NotAGitRepository,
    /// `error: pathspec 'x' did not match any file(s) known to git`
    PathspecDidNotMatchFiles,
    /// `fatal: invalid reference: x`
    InvalidReference,
    /// `fatal: 'x' is not a valid branch name`
    NotAValidBranchName,
    /// `fatal: not a valid object name: 'x'`
    NotAValidObjectName,
    /// `fatal: 'origin/x' is not a commit and a branch 'x' cannot be created from it`
    NotACommitAndBranchCannotBeCreated,
}

impl fmt::Display for GitErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotAGitRepository => "not a git repository",
            Self::PathspecDidNotMatchFiles => "pathspec did not match any files",
            Self::InvalidReference => "invalid reference",
            Self::NotAValidBranchName => "not a valid branch name",
            Self::NotAValidObjectName => "not a valid object name",
            Self::NotACommitAndBranchCannotBeCreated => "not a commit, branch cannot be created",
        };
        f.write_str(text)
    }
}

/// A git failure matched against one of the known patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub kind: GitErrorKind,
    /// Branch name captured from the message, when the pattern has one
    pub branch: Option<String>,
    pub message: String,
}

// Order matters: the first matching pattern wins.
static PATTERNS: LazyLock<Vec<(GitErrorKind, Regex)>> = LazyLock::new(|| {
    [
        (GitErrorKind::NotAGitRepository, r"not a git repository"),
        (
            GitErrorKind::PathspecDidNotMatchFiles,
            r"pathspec '(?P<branch>[^']+)' did not match any file\(s\) known to git",
        ),
        (
            GitErrorKind::InvalidReference,
            r"invalid reference: (?P<branch>\S+)",
        ),
        (
            GitErrorKind::NotAValidBranchName,
            r"'(?P<branch>[^']+)' is not a valid branch name",
        ),
        (
            GitErrorKind::NotAValidObjectName,
            r"[Nn]ot a valid object name:? '?(?P<branch>[^'\s]+)'?",
        ),
        (
            GitErrorKind::NotACommitAndBranchCannotBeCreated,
            r"'(?P<reference>[^']+)' is not a commit and a branch '(?P<branch>[^']+)' cannot be created from it",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("git error pattern is valid")))
    .collect()
});

/// Classify raw git error text.
///
/// Returns `None` when no known pattern matches; such errors must be
/// propagated unchanged.
pub fn classify(raw: &str) -> Option<ClassifiedError> {
    PATTERNS.iter().find_map(|(kind, regex)| {
        regex.captures(raw).map(|caps| ClassifiedError {
            kind: *kind,
            branch: caps.name("branch").map(|m| m.as_str().to_string()),
            message: raw.trim().to_string(),
        })
    })
}

/// Failure of a git invocation
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// Non-zero exit whose stderr matched a known pattern
    #[error("git {command} failed ({kind}): {message}")]
    Classified {
        command: String,
        kind: GitErrorKind,
        branch: Option<String>,
        message: String,
    },
    /// Non-zero exit with an unrecognized message
    #[error("git {command} failed: {stderr}")]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
    /// git could not be started at all
    #[error("failed to execute git {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl GitError {
    /// Build the error for a finished git process, classifying its stderr
    pub fn from_failure(command: &str, status: Option<i32>, stderr: &str) -> Self {
        match classify(stderr) {
            Some(classified) => Self::Classified {
                command: command.to_string(),
                kind: classified.kind,
                branch: classified.branch,
                message: classified.message,
            },
            None => Self::Failed {
                command: command.to_string(),
                status,
                stderr: stderr.trim().to_string(),
            },
        }
    }

    pub fn kind(&self) -> Option<GitErrorKind> {
        match self {
            Self::Classified { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::Classified { branch, .. } => branch.as_deref(),
            _ => None,
        }
    }

    pub fn is_kind(&self, kind: GitErrorKind) -> bool {
        self.kind() == Some(kind)
    }
}

/// Run a git operation, substituting `fallback` for expected failures.
///
/// A classified failure whose kind is listed in `only_when` (or any
/// classified failure when `only_when` is `None`) yields `fallback`.
/// Every other error, including unclassified ones, is returned as is.
pub fn run_guarded<T, F>(
    operation: F,
    fallback: T,
    only_when: Option<&[GitErrorKind]>,
) -> Result<T, GitError>
where
    F: FnOnce() -> Result<T, GitError>,
{
    match operation() {
        Ok(value) => Ok(value),
        Err(err) => match (err.kind(), only_when) {
            (Some(_), None) => Ok(fallback),
            (Some(kind), Some(kinds)) if kinds.contains(&kind) => Ok(fallback),
            _ => Err(err),
        },
    }
}
