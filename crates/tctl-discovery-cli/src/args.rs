use std::fmt;

use clap::{Args, Parser, Subcommand, ValueEnum};

// NOTE: Command Organization Rationale
//
// Why namespaced subcommands (not flat)?
// - `tasks` and `ssm-runs` each carry both a list and a detail view;
//   namespacing keeps `ls`/`show` consistent across both instead of
//   inventing `list-tasks`/`show-task`/`list-ssm-runs`/`show-ssm-run`.
// - `discover` is kept as an alias of `discovery` for muscle-memory
//   compatibility (§4.9).

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tctl-discovery", version, about = "Cloud auto-enrollment triage")]
pub struct Cli {
    /// Cosmetic only: gates a handful of fetch-progress debug traces,
    /// never a logging framework (no tracing/log crate in this
    /// subsystem).
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: TopCommand,
}

#[derive(Debug, Subcommand)]
pub enum TopCommand {
    /// Discovery pipeline triage (tasks, discovery configs, SSM runs).
    #[command(alias = "discover", subcommand)]
    Discovery(DiscoveryCommand),
}

#[derive(Debug, Subcommand)]
pub enum DiscoveryCommand {
    /// Fused health view: tasks + discovery configs + resource stats.
    Status(StatusArgs),
    /// Inspect open/resolved discovery tasks.
    #[command(subcommand)]
    Tasks(TasksCommand),
    /// Inspect SSM agent-install run history.
    #[command(name = "ssm-runs", subcommand)]
    SsmRuns(SsmRunsCommand),
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// "open" (default), "resolved", or "all".
    #[arg(long, default_value = "open")]
    pub state: String,
    #[arg(long, default_value = "")]
    pub integration: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List tasks matching the given filters.
    #[command(alias = "list")]
    Ls(TasksLsArgs),
    /// Show one task by unique name prefix.
    Show(TasksShowArgs),
}

#[derive(Debug, Args)]
pub struct TasksLsArgs {
    #[arg(long, default_value = "")]
    pub state: String,
    #[arg(long, default_value = "")]
    pub integration: String,
    #[arg(long = "task-type", default_value = "")]
    pub task_type: String,
    #[arg(long = "issue-type", default_value = "")]
    pub issue_type: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct TasksShowArgs {
    pub name: String,
    #[arg(long = "page-size", default_value_t = 25)]
    pub page_size: usize,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum SsmRunsCommand {
    #[command(alias = "list")]
    Ls(SsmRunsLsArgs),
    Show(SsmRunsShowArgs),
}

#[derive(Debug, Args)]
pub struct SsmRunsLsArgs {
    #[arg(long, default_value = "1h")]
    pub since: String,
    #[arg(long, default_value_t = false)]
    pub failed: bool,
    #[arg(long, default_value_t = 200)]
    pub limit: usize,
    #[arg(long = "page-size", default_value_t = 25)]
    pub page_size: usize,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long = "show-all-runs", default_value_t = false)]
    pub show_all_runs: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct SsmRunsShowArgs {
    #[arg(value_name = "INSTANCE_ID")]
    pub instance_id: String,
    #[arg(long, default_value = "1h")]
    pub since: String,
    #[arg(long, default_value_t = false)]
    pub failed: bool,
    #[arg(long, default_value_t = 200)]
    pub limit: usize,
    #[arg(long = "show-all-runs", default_value_t = false)]
    pub show_all_runs: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
