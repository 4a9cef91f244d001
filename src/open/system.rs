//! The platform's default opener

use anyhow::{bail, Context, Result};
use std::process::Command;

use super::{OpenBackend, OpenKind, OpenOptions};

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(not(target_os = "macos"))]
const OPENER: &str = "xdg-open";

/// Hands the target to `xdg-open` (or `open` on macOS)
#[derive(Debug, Default)]
pub struct SystemBackend;

impl OpenBackend for SystemBackend {
    fn name(&self) -> &str {
        "system"
    }

    fn is_installed(&self) -> bool {
        which::which(OPENER).is_ok()
    }

    fn supports(&self, _kind: OpenKind, options: &OpenOptions) -> bool {
        !options.reuse_window && !options.wait_for_close
    }

    fn open(&self, target: &str, _kind: OpenKind, _options: &OpenOptions) -> Result<()> {
        tracing::debug!(opener = OPENER, path = target, "opening with system handler");
        let status = Command::new(OPENER)
            .arg(target)
            .status()
            .with_context(|| format!("Failed to run {OPENER}"))?;
        if !status.success() {
            bail!("{OPENER} {target} exited with {status}");
        }
        Ok(())
    }
}
