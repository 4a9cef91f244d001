//! Opening worktrees, files and URLs in external programs
//!
//! ## Module structure
//!
//! - `editor`: VS Code, Cursor, Zed and Sublime Text
//! - `terminal`: a new terminal window in the folder
//! - `system`: `xdg-open` / `open`, used when nothing else applies

mod editor;
mod system;
mod terminal;

pub use editor::EditorBackend;
pub use system::SystemBackend;
pub use terminal::{detect_terminal, TerminalBackend, TerminalEmulator};

use anyhow::Result;
use colored::Colorize;

use crate::prompt::Prompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenKind {
    File,
    Folder,
    Url,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenOptions {
    pub reuse_window: bool,
    pub wait_for_close: bool,
}

/// Something that can open a path or URL
pub trait OpenBackend {
    /// Name used in the config file and in prompts
    fn name(&self) -> &str;
    fn is_installed(&self) -> bool;
    fn supports(&self, kind: OpenKind, options: &OpenOptions) -> bool;
    fn open(&self, target: &str, kind: OpenKind, options: &OpenOptions) -> Result<()>;
}

const DO_NOTHING: &str = "Do nothing";

/// Picks a backend for each open request and runs it
pub struct OpenDispatcher {
    backends: Vec<Box<dyn OpenBackend>>,
    fallback: Box<dyn OpenBackend>,
    preferred: Option<String>,
}

impl OpenDispatcher {
    pub fn new(backends: Vec<Box<dyn OpenBackend>>, fallback: Box<dyn OpenBackend>) -> Self {
        Self {
            backends,
            fallback,
            preferred: None,
        }
    }

    /// Editors and the terminal, falling back to the system opener
    pub fn with_defaults() -> Self {
        let mut backends: Vec<Box<dyn OpenBackend>> = EditorBackend::all()
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn OpenBackend>)
            .collect();
        backends.push(Box::new(TerminalBackend));
        Self::new(backends, Box::new(SystemBackend))
    }

    /// Backend to use without asking whenever it is a candidate
    pub fn with_preferred(mut self, preferred: Option<String>) -> Self {
        self.preferred = preferred;
        self
    }

    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Installed backends able to handle the request
    pub fn candidates(&self, kind: OpenKind, options: &OpenOptions) -> Vec<&dyn OpenBackend> {
        self.backends
            .iter()
            .map(|b| b.as_ref())
            .filter(|b| b.is_installed() && b.supports(kind, options))
            .collect()
    }

    /// Open `target`; `Ok(false)` when nothing was opened
    pub fn open(
        &self,
        target: &str,
        kind: OpenKind,
        options: &OpenOptions,
        prompter: &dyn Prompter,
    ) -> Result<bool> {
        let candidates = self.candidates(kind, options);

        if let Some(preferred) = self.preferred.as_deref() {
            match candidates.iter().find(|b| b.name() == preferred) {
                Some(backend) => return Ok(invoke(*backend, target, kind, options)),
                None => tracing::debug!(preferred, "preferred backend not available"),
            }
        }

        match candidates.as_slice() {
            [] => Ok(invoke(self.fallback.as_ref(), target, kind, options)),
            [only] => Ok(invoke(*only, target, kind, options)),
            several => {
                let mut choices: Vec<String> =
                    several.iter().map(|b| b.name().to_string()).collect();
                choices.push(DO_NOTHING.to_string());
                match prompter.select(&format!("Open {target} with"), &choices)? {
                    Some(index) if index < several.len() => {
                        Ok(invoke(several[index], target, kind, options))
                    }
                    _ => Ok(false),
                }
            }
        }
    }
}

fn invoke(backend: &dyn OpenBackend, target: &str, kind: OpenKind, options: &OpenOptions) -> bool {
    match backend.open(target, kind, options) {
        Ok(()) => {
            eprintln!("{} Opened {} with {}", "✓".green().bold(), target, backend.name());
            true
        }
        Err(err) => {
            tracing::warn!(backend = backend.name(), error = %format!("{err:#}"), "open failed");
            eprintln!("{} Could not open {target} with {}", "!".yellow().bold(), backend.name());
            false
        }
    }
}
