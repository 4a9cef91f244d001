//! `twig open`: open a folder, file or URL with one of the open backends

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::open::{OpenDispatcher, OpenKind, OpenOptions};
use crate::prompt::DialoguerPrompter;

/// Decide how `target` should be opened
pub fn classify_target(target: &str) -> OpenKind {
    if target.starts_with("http://") || target.starts_with("https://") {
        OpenKind::Url
    } else if Path::new(target).is_dir() {
        OpenKind::Folder
    } else {
        OpenKind::File
    }
}

pub fn execute(target: Option<String>, reuse_window: bool, wait: bool) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let target = target.unwrap_or_else(|| ".".to_string());
    let kind = classify_target(&target);

    let target = match kind {
        OpenKind::Url => target,
        OpenKind::File | OpenKind::Folder => Path::new(&target)
            .canonicalize()
            .with_context(|| format!("{target} does not exist"))?
            .display()
            .to_string(),
    };

    let options = OpenOptions {
        reuse_window: reuse_window || config.editor.reuse_window,
        wait_for_close: wait,
    };
    let opener = OpenDispatcher::with_defaults().with_preferred(config.editor.preferred);
    opener.open(&target, kind, &options, &DialoguerPrompter::new())?;
    Ok(())
}
