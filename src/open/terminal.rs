//! Opening a folder in a new terminal window
//!
//! The emulator is detected the same way on every call: `$TERMINAL`, the
//! desktop's configured default, `xdg-terminal-exec`, then a list of common
//! emulators.

use anyhow::{bail, Context, Result};
use shell_escape::escape;
use std::borrow::Cow;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{OpenBackend, OpenKind, OpenOptions};

/// Supported terminal emulators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEmulator {
    XdgTerminalExec,
    Kitty,
    Alacritty,
    Foot,
    Wezterm,
    GnomeTerminal,
    Konsole,
    Xfce4Terminal,
    XTerm,
}

impl TerminalEmulator {
    pub fn binary(&self) -> &'static str {
        match self {
            Self::XdgTerminalExec => "xdg-terminal-exec",
            Self::Kitty => "kitty",
            Self::Alacritty => "alacritty",
            Self::Foot => "foot",
            Self::Wezterm => "wezterm",
            Self::GnomeTerminal => "gnome-terminal",
            Self::Konsole => "konsole",
            Self::Xfce4Terminal => "xfce4-terminal",
            Self::XTerm => "xterm",
        }
    }

    pub fn from_binary(binary: &str) -> Option<Self> {
        let binary = Path::new(binary).file_name()?.to_str()?;
        match binary {
            "xdg-terminal-exec" => Some(Self::XdgTerminalExec),
            "kitty" => Some(Self::Kitty),
            "alacritty" => Some(Self::Alacritty),
            "foot" => Some(Self::Foot),
            "wezterm" => Some(Self::Wezterm),
            "gnome-terminal" => Some(Self::GnomeTerminal),
            "konsole" => Some(Self::Konsole),
            "xfce4-terminal" => Some(Self::Xfce4Terminal),
            "xterm" => Some(Self::XTerm),
            _ => None,
        }
    }

    /// Command that opens this terminal in `workdir` running `shell`
    pub fn build_command(&self, title: &str, workdir: &Path, shell: &str) -> Command {
        let mut command = Command::new(self.binary());
        let exec = format!("exec {}", escape(Cow::Borrowed(shell)));

        match self {
            Self::XdgTerminalExec => {
                command
                    .arg(format!("--title={title}"))
                    .arg(format!("--dir={}", workdir.display()))
                    .arg("--")
                    .arg(shell);
            }
            Self::Kitty => {
                command
                    .arg("--title")
                    .arg(title)
                    .arg("--directory")
                    .arg(workdir)
                    .arg(shell);
            }
            Self::Alacritty => {
                command
                    .arg("--title")
                    .arg(title)
                    .arg("--working-directory")
                    .arg(workdir)
                    .arg("-e")
                    .arg(shell);
            }
            Self::Foot => {
                command
                    .arg("--title")
                    .arg(title)
                    .arg("--working-directory")
                    .arg(workdir)
                    .arg(shell);
            }
            Self::Wezterm => {
                command
                    .arg("start")
                    .arg("--cwd")
                    .arg(workdir)
                    .arg("--")
                    .arg(shell);
            }
            Self::GnomeTerminal => {
                command
                    .arg("--title")
                    .arg(title)
                    .arg("--working-directory")
                    .arg(workdir)
                    .arg("--")
                    .arg(shell);
            }
            Self::Konsole => {
                command.arg("--workdir").arg(workdir).arg("-e").arg(shell);
            }
            Self::Xfce4Terminal => {
                command
                    .arg("--title")
                    .arg(title)
                    .arg("--working-directory")
                    .arg(workdir)
                    .arg("-x")
                    .arg(shell);
            }
            Self::XTerm => {
                let dir = workdir.display().to_string();
                command
                    .arg("-title")
                    .arg(title)
                    .arg("-e")
                    .arg("sh")
                    .arg("-c")
                    .arg(format!("cd {} && {exec}", escape(Cow::Owned(dir))));
            }
        }

        command
    }
}

impl std::fmt::Display for TerminalEmulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Find a usable terminal emulator
pub fn detect_terminal() -> Result<TerminalEmulator> {
    if let Ok(terminal) = std::env::var("TERMINAL") {
        if !terminal.is_empty() && which::which(&terminal).is_ok() {
            if let Some(emulator) = TerminalEmulator::from_binary(&terminal) {
                return Ok(emulator);
            }
        }
    }

    if let Some(terminal) = desktop_default_terminal() {
        if which::which(&terminal).is_ok() {
            if let Some(emulator) = TerminalEmulator::from_binary(&terminal) {
                return Ok(emulator);
            }
        }
    }

    if which::which("xdg-terminal-exec").is_ok() {
        return Ok(TerminalEmulator::XdgTerminalExec);
    }

    let candidates = [
        TerminalEmulator::Kitty,
        TerminalEmulator::Alacritty,
        TerminalEmulator::Foot,
        TerminalEmulator::Wezterm,
        TerminalEmulator::GnomeTerminal,
        TerminalEmulator::Konsole,
        TerminalEmulator::Xfce4Terminal,
        TerminalEmulator::XTerm,
    ];
    for candidate in candidates {
        if which::which(candidate.binary()).is_ok() {
            return Ok(candidate);
        }
    }

    bail!(
        "No terminal emulator found. Set TERMINAL or install one of: \
         kitty, alacritty, foot, wezterm, gnome-terminal, konsole, xfce4-terminal, xterm"
    )
}

/// Default terminal configured in GNOME or Cosmic settings
fn desktop_default_terminal() -> Option<String> {
    let queries: [(&str, &[&str]); 2] = [
        (
            "gsettings",
            &["get", "org.gnome.desktop.default-applications.terminal", "exec"],
        ),
        ("dconf", &["read", "/com/system76/cosmic/default-terminal"]),
    ];
    for (program, args) in queries {
        let Ok(output) = Command::new(program).args(args).output() else {
            continue;
        };
        if !output.status.success() {
            continue;
        }
        let terminal = String::from_utf8_lossy(&output.stdout)
            .trim()
            .trim_matches('\'')
            .to_string();
        if !terminal.is_empty() {
            return Some(terminal);
        }
    }
    None
}

fn user_shell() -> String {
    std::env::var("SHELL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "sh".to_string())
}

/// Opens folders in a new terminal window
#[derive(Debug, Default)]
pub struct TerminalBackend;

impl OpenBackend for TerminalBackend {
    fn name(&self) -> &str {
        "terminal"
    }

    fn is_installed(&self) -> bool {
        detect_terminal().is_ok()
    }

    fn supports(&self, kind: OpenKind, options: &OpenOptions) -> bool {
        kind == OpenKind::Folder && !options.reuse_window && !options.wait_for_close
    }

    fn open(&self, target: &str, _kind: OpenKind, _options: &OpenOptions) -> Result<()> {
        let emulator = detect_terminal()?;
        let workdir = Path::new(target);
        let title = workdir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| target.to_string());
        tracing::debug!(terminal = %emulator, dir = target, "spawning terminal");
        emulator
            .build_command(&title, workdir, &user_shell())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {emulator}"))?;
        Ok(())
    }
}
