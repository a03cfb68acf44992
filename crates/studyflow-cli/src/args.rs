use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{InsightsArgs, PlanCommands, SessionCommands, StatsCommands, TaskCommands};

/// Main command-line interface for the studyflow study planner
///
/// Studyflow is a personal study planning system that organizes work into
/// plans with tasks, tracks focus sessions against them, and derives
/// analytics (daily stats, streaks, insights) and a burnout score from the
/// session history. It provides a command-line interface for all operations
/// plus an MCP (Model Context Protocol) server mode for integration with AI
/// assistants.
#[derive(Parser)]
#[command(version, about, name = "studyflow")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/studyflow/studyflow.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// User identity every operation is scoped to
    #[arg(long, global = true, env = "STUDYFLOW_USER", default_value = "local")]
    pub user: String,

    /// IANA timezone used for day bucketing. Defaults to the system zone
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the studyflow CLI
///
/// The CLI is organized into five command categories:
/// - `plan`: Operations for managing study plans (create, import, list, etc.)
/// - `task`: Completion toggles for tasks within plans
/// - `session`: Focus session lifecycle (start, end, cancel, status)
/// - `stats` / `insights` / `burnout`: Analytics over the session history
/// - `serve`: Start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Manage study plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage tasks within plans
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage focus sessions
    #[command(alias = "s")]
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Show study statistics
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
    /// Show productivity insights over a trailing window
    Insights(InsightsArgs),
    /// Show the current burnout assessment
    Burnout,
    /// Start the MCP server
    Serve,
}
