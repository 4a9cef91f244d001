use clap::{Args, Parser, Subcommand};

const HELP_TEMPLATE: &str = "
  ╷ ╷
  ├─┼─ twig
  ╵ ╵

{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}";

#[derive(Parser)]
#[command(name = "twig")]
#[command(about = "Worktree, branch and workflow helper", long_about = None)]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Print debug logs to stderr (overridden by TWIG_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Switch to a branch or pull request in a worktree, creating one if needed
    Do(DoCommand),

    /// Manage the worktrees of the current repository
    Worktree {
        #[command(subcommand)]
        command: WorktreeCommands,
    },

    /// Inspect and run configured workflows
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },

    /// Open a folder, file or URL in an editor, terminal or the system opener
    Open {
        /// Path or URL (default: current directory)
        target: Option<String>,

        /// Reuse the current editor window
        #[arg(short, long)]
        reuse_window: bool,

        /// Wait until the editor closes the file
        #[arg(short, long)]
        wait: bool,
    },

    /// Show CI checks of a pull request (default: the current branch)
    Checks {
        /// PR number, PR URL or branch
        target: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },

    /// Internal: Dynamic completion helper (invoked by shell)
    #[command(hide = true)]
    Complete {
        /// What to complete: branches or workflows
        target: String,
        /// Text typed so far
        #[arg(default_value = "")]
        prefix: String,
    },
}

#[derive(Args)]
pub struct DoCommand {
    /// Branch name, PR number (#123) or PR URL; asked for when omitted
    pub input: Option<String>,

    /// Do not offer to create the branch when it does not exist
    #[arg(long)]
    pub no_new: bool,

    /// Do not fetch from the remote before looking the branch up
    #[arg(long)]
    pub no_fetch: bool,

    /// Do not run hook workflows
    #[arg(long)]
    pub skip_hooks: bool,

    /// Open in the current editor window (hooks finish before opening)
    #[arg(short, long)]
    pub reuse_window: bool,

    /// Print the worktree path instead of opening it
    #[arg(long)]
    pub no_open: bool,

    /// Show `gh pr checks` once the worktree is ready
    #[arg(short, long)]
    pub checks: bool,

    /// Run confirm-gated workflows without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Keep going when a workflow step fails
    #[arg(long)]
    pub continue_on_error: bool,
}

#[derive(Subcommand)]
pub enum WorktreeCommands {
    /// List all worktrees
    List,

    /// Remove a worktree and delete its branch if merged
    Remove {
        /// Directory name, branch or path of the worktree
        name: String,

        /// Remove even with uncommitted changes
        #[arg(short, long)]
        force: bool,

        /// Keep the branch
        #[arg(long)]
        keep_branch: bool,
    },

    /// Forget worktrees whose directories no longer exist
    Prune,
}

#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// List configured workflows
    List,

    /// Show the resolved steps of a workflow without running it
    Show {
        /// Workflow id or alias
        id: String,

        /// Extra interpolation variable (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },

    /// Run a workflow in the current directory
    Run {
        /// Workflow id or alias
        id: String,

        /// Extra interpolation variable (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        vars: Vec<String>,

        /// Run confirm-gated workflows without asking
        #[arg(short, long)]
        yes: bool,

        /// Keep going when a step fails
        #[arg(long)]
        continue_on_error: bool,
    },
}
