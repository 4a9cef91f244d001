//! Code editors launched through their command-line helpers

use anyhow::{bail, Context, Result};
use std::process::Command;

use super::{OpenBackend, OpenKind, OpenOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorBackend {
    name: &'static str,
    binary: &'static str,
    reuse_flag: Option<&'static str>,
    new_window_flag: Option<&'static str>,
    wait_flag: Option<&'static str>,
}

impl EditorBackend {
    pub fn vscode() -> Self {
        Self {
            name: "code",
            binary: "code",
            reuse_flag: Some("--reuse-window"),
            new_window_flag: Some("--new-window"),
            wait_flag: Some("--wait"),
        }
    }

    pub fn cursor() -> Self {
        Self {
            name: "cursor",
            binary: "cursor",
            ..Self::vscode()
        }
    }

    pub fn zed() -> Self {
        Self {
            name: "zed",
            binary: "zed",
            reuse_flag: Some("--add"),
            new_window_flag: Some("--new"),
            wait_flag: Some("--wait"),
        }
    }

    pub fn sublime() -> Self {
        Self {
            name: "subl",
            binary: "subl",
            reuse_flag: Some("--add"),
            new_window_flag: Some("--new-window"),
            wait_flag: Some("--wait"),
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::vscode(), Self::cursor(), Self::zed(), Self::sublime()]
    }

    /// Arguments for opening `target`
    pub fn arguments(&self, target: &str, kind: OpenKind, options: &OpenOptions) -> Vec<String> {
        let mut args = Vec::new();
        let window_flag = if options.reuse_window {
            self.reuse_flag
        } else if kind == OpenKind::Folder {
            self.new_window_flag
        } else {
            None
        };
        args.extend(window_flag.map(str::to_string));
        if options.wait_for_close {
            args.extend(self.wait_flag.map(str::to_string));
        }
        args.push(target.to_string());
        args
    }
}

impl OpenBackend for EditorBackend {
    fn name(&self) -> &str {
        self.name
    }

    fn is_installed(&self) -> bool {
        which::which(self.binary).is_ok()
    }

    fn supports(&self, kind: OpenKind, options: &OpenOptions) -> bool {
        kind != OpenKind::Url
            && (!options.reuse_window || self.reuse_flag.is_some())
            && (!options.wait_for_close || self.wait_flag.is_some())
    }

    fn open(&self, target: &str, kind: OpenKind, options: &OpenOptions) -> Result<()> {
        let args = self.arguments(target, kind, options);
        tracing::debug!(editor = self.binary, ?args, "opening in editor");
        let status = Command::new(self.binary)
            .args(&args)
            .status()
            .with_context(|| format!("Failed to run {}", self.binary))?;
        if !status.success() {
            bail!("{} exited with {status}", self.binary);
        }
        Ok(())
    }
}
