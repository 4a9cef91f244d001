//! Thin wrappers around the GitHub CLI (`gh`)

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

static PR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://[^/\s]+/[^/\s]+/[^/\s]+/pull/(\d+))(?:[/?#].*)?$")
        .expect("pull request URL pattern is valid")
});

/// Pull request referenced by user input: `#123`, `123` or a PR URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReference {
    pub number: u64,
    /// Original URL, when given one; lets `gh` resolve other repositories
    pub url: Option<String>,
}

impl PrReference {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return digits.parse().ok().map(|number| Self { number, url: None });
        }
        let caps = PR_URL.captures(input)?;
        let number = caps[2].parse().ok()?;
        Some(Self {
            number,
            url: Some(caps[1].to_string()),
        })
    }

    /// Argument to hand to `gh pr ...`
    pub fn argument(&self) -> String {
        self.url.clone().unwrap_or_else(|| self.number.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrView {
    head_ref_name: String,
}

pub fn gh_available() -> bool {
    which::which("gh").is_ok()
}

/// Head branch of a pull request
pub fn pr_head_branch(pr: &PrReference, dir: &Path) -> Result<String> {
    let argument = pr.argument();
    tracing::debug!(pr = %argument, "resolving pull request head branch");
    let output = Command::new("gh")
        .args(["pr", "view", &argument, "--json", "headRefName"])
        .current_dir(dir)
        .output()
        .context("Failed to run gh. Is the GitHub CLI installed?")?;
    if !output.status.success() {
        bail!(
            "gh pr view {argument} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    parse_head_branch(&String::from_utf8_lossy(&output.stdout))
}

fn parse_head_branch(json: &str) -> Result<String> {
    let view: PrView =
        serde_json::from_str(json).context("Unexpected output from gh pr view")?;
    if view.head_ref_name.is_empty() {
        bail!("Pull request has no head branch");
    }
    Ok(view.head_ref_name)
}

/// Show CI check status for a branch or PR.
///
/// Best-effort: failures are logged and never interrupt the caller.
pub fn show_pr_checks(target: &str, dir: &Path) {
    if !gh_available() {
        tracing::warn!("gh not found, skipping PR checks");
        return;
    }
    let status = Command::new("gh")
        .args(["pr", "checks", target])
        .current_dir(dir)
        .status();
    match status {
        Ok(status) if status.success() => {}
        // gh exits 8 while checks are still pending
        Ok(status) if status.code() == Some(8) => {}
        Ok(status) => tracing::warn!(pr = target, %status, "gh pr checks failed"),
        Err(err) => tracing::warn!(pr = target, error = %err, "could not run gh pr checks"),
    }
}
