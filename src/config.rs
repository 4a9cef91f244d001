//! User configuration
//!
//! Read from `$TWIG_CONFIG`, or `twig/config.toml` under the platform config
//! directory. A missing file means defaults; a file that fails to parse or
//! validate is fatal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::workflow::{WorkflowError, WorkflowSet};

pub const CONFIG_ENV: &str = "TWIG_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid workflows")]
    Workflow(#[from] WorkflowError),

    #[error("project path must not be empty")]
    EmptyProjectPath,

    #[error("hook {hook} of project {} refers to unknown workflow '{workflow}'", project.display())]
    UnknownHookWorkflow {
        project: PathBuf,
        hook: HookPoint,
        workflow: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub worktrees: WorktreesConfig,
    pub workflows: WorkflowSet,
    pub projects: Vec<ProjectConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name of the open backend to use without asking
    pub preferred: Option<String>,
    /// Reuse an existing editor window instead of opening a new one
    pub reuse_window: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorktreesConfig {
    /// Name new worktrees `<repo>-<n>` instead of `<n>`
    pub prefix_with_repo_name: bool,
    /// Where new worktrees go instead of `<repo>.worktrees/`
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub hooks: Hooks,
}

/// Workflow ids to run at each hook point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hooks {
    pub on_create: Option<String>,
    pub on_checkout: Option<String>,
    pub on_switch: Option<String>,
    pub before_open: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPoint {
    /// After a new worktree was created
    OnCreate,
    /// After a branch was checked out in a reused worktree
    OnCheckout,
    /// When the branch already had a worktree
    OnSwitch,
    /// Right before the worktree is opened
    BeforeOpen,
}

impl HookPoint {
    pub fn all() -> [HookPoint; 4] {
        [
            Self::OnCreate,
            Self::OnCheckout,
            Self::OnSwitch,
            Self::BeforeOpen,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::OnCreate => "on_create",
            Self::OnCheckout => "on_checkout",
            Self::OnSwitch => "on_switch",
            Self::BeforeOpen => "before_open",
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Hooks {
    pub fn get(&self, point: HookPoint) -> Option<&str> {
        let id = match point {
            HookPoint::OnCreate => &self.on_create,
            HookPoint::OnCheckout => &self.on_checkout,
            HookPoint::OnSwitch => &self.on_switch,
            HookPoint::BeforeOpen => &self.before_open,
        };
        id.as_deref()
    }
}

/// Location of the config file, `None` when no config directory is known
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("twig").join("config.toml"))
}

impl Config {
    /// Load the user's config, or defaults when there is none
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text, path)
    }

    /// Parse and validate config text; `path` is only used in errors
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.workflows.validate()?;
        for project in &self.projects {
            if project.path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyProjectPath);
            }
            for point in HookPoint::all() {
                if let Some(id) = project.hooks.get(point) {
                    if self.workflows.get(id).is_none() {
                        return Err(ConfigError::UnknownHookWorkflow {
                            project: project.path.clone(),
                            hook: point,
                            workflow: id.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Project entry whose path is the given repository root
    pub fn project_for(&self, repo_root: &Path) -> Option<&ProjectConfig> {
        let repo_root = canonical(repo_root);
        self.projects
            .iter()
            .find(|p| canonical(&expand_home(&p.path)) == repo_root)
    }

    /// Workflow id configured for a hook point of the given repository
    pub fn hook(&self, repo_root: &Path, point: HookPoint) -> Option<&str> {
        self.project_for(repo_root)?.hooks.get(point)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
