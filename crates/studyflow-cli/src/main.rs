//! Studyflow CLI Application
//!
//! Command-line interface for the studyflow personal study planner.

mod args;
mod cli;
mod extract;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, StudyflowMcpServer};
use renderer::TerminalRenderer;
use studyflow_core::StudyPlannerBuilder;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, user, timezone, no_color, command } = Args::parse();

    let mut builder = StudyPlannerBuilder::new().with_database_path(database_file);
    if let Some(name) = timezone.as_deref() {
        builder = builder
            .with_timezone_name(name)
            .context("Invalid timezone")?;
    }
    let planner = builder.build().await.context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Studyflow started for user {user}");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer, user)
                .handle_plan_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(planner, renderer, user)
                .handle_task_command(command)
                .await
        }
        Some(Session { command }) => {
            Cli::new(planner, renderer, user)
                .handle_session_command(command)
                .await
        }
        Some(Stats { command }) => {
            Cli::new(planner, renderer, user)
                .handle_stats_command(command)
                .await
        }
        Some(Insights(insights_args)) => {
            Cli::new(planner, renderer, user)
                .handle_insights(insights_args)
                .await
        }
        Some(Burnout) => Cli::new(planner, renderer, user).handle_burnout().await,
        Some(Serve) => {
            info!("Starting studyflow MCP server");
            run_stdio_server(StudyflowMcpServer::new(planner, user))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(planner, renderer, user)
                .list_plans(&Default::default())
                .await
        }
    }
}
