//! Clap derive structures for the `gatehouse` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gatehouse -- command-line client for hypermedia door controllers
#[derive(Debug, Parser)]
#[command(
    name = "gatehouse",
    version,
    about = "Operate and observe a door controller from the command line",
    long_about = "A CLI for door controllers that expose a link-driven REST API.\n\n\
        The controller's capabilities are discovered at runtime from its\n\
        entrypoint resource; gatehouse follows link relations, never\n\
        hardcoded paths.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "GATEHOUSE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller root URL (overrides profile)
    #[arg(long, short = 'c', env = "GATEHOUSE_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Access token
    #[arg(long, env = "GATEHOUSE_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GATEHOUSE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GATEHOUSE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "GATEHOUSE_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current door state
    #[command(alias = "st")]
    Status,

    /// Open the door
    Open,

    /// Close the door
    Close,

    /// Toggle the door (open when closed, close when opened)
    #[command(alias = "op")]
    Operate,

    /// Poll the door state continuously until interrupted
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Show or reset movement statistics
    Stats(StatsArgs),

    /// Show the door operation log
    Logs(LogsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── WATCH ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between poll cycles (overrides profile)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

// ── STATS ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Show min/max/average movement durations
    Show,

    /// Delete all recorded statistics on the controller
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

// ── LOGS ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LogsArgs {
    /// Max log entries per page
    #[arg(long, short = 'l', default_value = "50")]
    pub page_size: u32,

    /// Pagination offset (newest entry is index 0)
    #[arg(long, default_value = "0")]
    pub start_index: u32,
}

// ── CONFIG ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display the resolved configuration (tokens redacted)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── COMPLETIONS ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
