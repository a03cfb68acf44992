//! MCP server implementation for studyflow
//!
//! Exposes the study planner over the Model Context Protocol so AI
//! assistants can create plans, run focus sessions, and read analytics.
//! The server is bound to a single user identity at startup; every tool
//! call operates on that user's data.

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use studyflow_core::StudyPlanner;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use errors::to_mcp_error;
pub use handlers::{
    CreatePlan, EndSession, Id, InsightsRange, ListPlans, McpResult, OptimizeTasks, SetTaskDone,
    StartSession,
};

/// MCP server for studyflow, bound to one user
#[derive(Clone)]
pub struct StudyflowMcpServer {
    planner: Arc<Mutex<StudyPlanner>>,
    user: Arc<String>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl StudyflowMcpServer {
    pub fn new(planner: StudyPlanner, user: String) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            user: Arc::new(user),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone(), self.user.clone())
    }

    // Tool methods that delegate to handlers::McpHandlers methods
    #[tool(
        name = "create_plan",
        description = "Create a new study plan and make it the active one. Provide a title (required), optional inline tasks (each with title, optional subject/plannedMinutes/order), optional input context such as energy level, and optionally the raw AI-generated plan object. Returns the new plan ID."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List the user's study plans, newest first with the active plan on top. Use limit to bound the page size (default 10); the active plan is always included even when it falls outside the page."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        self.handlers().list_plans(params).await
    }

    #[tool(
        name = "get_active_plan",
        description = "Show the user's active study plan together with its tasks and per-task completion state. Returns a note when no plan exists yet."
    )]
    async fn get_active_plan(&self) -> McpResult {
        self.handlers().get_active_plan().await
    }

    #[tool(
        name = "get_plan_tasks",
        description = "List the tasks of a specific plan in order, with planned minutes, completion state, and any priority or note. Use the plan ID from list_plans."
    )]
    async fn get_plan_tasks(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().get_plan_tasks(params).await
    }

    #[tool(
        name = "set_plan_active",
        description = "Make a plan the active one. Exactly one plan per user is active at a time; the previously active plan is deactivated in the same transaction."
    )]
    async fn set_plan_active(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().set_plan_active(params).await
    }

    #[tool(
        name = "optimize_tasks",
        description = "Apply a batch of per-task updates (plannedMinutes, priority, order, note) to a plan's tasks atomically. Entries without a task ID are skipped, not failed. Marks the plan as optimized and returns how many updates were applied."
    )]
    async fn optimize_tasks(&self, params: Parameters<OptimizeTasks>) -> McpResult {
        self.handlers().optimize_tasks(params).await
    }

    #[tool(
        name = "set_task_done",
        description = "Mark a task as done or not done. done defaults to true; completion is timestamped when set and cleared when undone."
    )]
    async fn set_task_done(&self, params: Parameters<SetTaskDone>) -> McpResult {
        self.handlers().set_task_done(params).await
    }

    #[tool(
        name = "start_session",
        description = "Start a focus session against a plan. Modes: pomodoro (default), short, long. If a session is already running, its ID is returned with a resumed note instead of starting a duplicate. Optional plannedMinutes/scaledMinutes/subject/burnoutScoreAtStart are stored as analytics context."
    )]
    async fn start_session(&self, params: Parameters<StartSession>) -> McpResult {
        self.handlers().start_session(params).await
    }

    #[tool(
        name = "end_session",
        description = "End a session with the actual focus minutes. status may be 'completed' (default) or 'cancelled'; an optional burnoutScoreAtEnd is recorded. Ending an already-ended session overwrites its terminal fields (last write wins)."
    )]
    async fn end_session(&self, params: Parameters<EndSession>) -> McpResult {
        self.handlers().end_session(params).await
    }

    #[tool(
        name = "cancel_session",
        description = "Cancel a session, recording zero focus minutes. Cancelled sessions are excluded from all analytics."
    )]
    async fn cancel_session(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().cancel_session(params).await
    }

    #[tool(
        name = "today_stats",
        description = "Total focus minutes and session count for today, counting only completed pomodoro sessions."
    )]
    async fn today_stats(&self) -> McpResult {
        self.handlers().today_stats().await
    }

    #[tool(
        name = "weekly_stats",
        description = "Per-day focus minutes over the last 7 days including today, with zero-filled days. Counts only completed pomodoro sessions."
    )]
    async fn weekly_stats(&self) -> McpResult {
        self.handlers().weekly_stats().await
    }

    #[tool(
        name = "streak",
        description = "Consecutive study days ending today. A day counts when it has at least one completed pomodoro session."
    )]
    async fn streak(&self) -> McpResult {
        self.handlers().streak().await
    }

    #[tool(
        name = "insights",
        description = "Productivity insights over a trailing window (default 7 days): actual vs planned vs scaled minutes, productivity and focus-efficiency percentages, average burnout score, and per-subject minutes."
    )]
    async fn insights(&self, params: Parameters<InsightsRange>) -> McpResult {
        self.handlers().insights(params).await
    }

    #[tool(
        name = "burnout",
        description = "Current burnout assessment: a 0-100 score built from the active plan's energy level, task completion ratio, study streak, and today's focus load, with a status of Healthy, Fatigued, or Burnout Risk."
    )]
    async fn burnout(&self) -> McpResult {
        self.handlers().burnout().await
    }

    /// List all available prompts
    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request, context).await
    }

    /// Get a specific prompt by name and apply arguments
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request, context).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for StudyflowMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "studyflow".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(r#"Studyflow is a personal study planner that tracks study plans, focus sessions, and burnout.

## Core Concepts
- **Plans**: A study goal with tasks. Exactly one plan is active at a time; new plans become active on creation.
- **Tasks**: Units of work within a plan, each with planned minutes, optional subject, and a done flag.
- **Sessions**: Timed focus runs against a plan (pomodoro, short, or long). Only completed pomodoro sessions count toward analytics.
- **Burnout score**: A 0-100 risk score derived from energy level, task completion, streak, and today's focus load.

## Workflow Examples

### Planning a study week
1. Generate a plan with the `plan` prompt, then store it with `create_plan` (pass the raw object as aiPlan)
2. Review it with `get_active_plan`
3. Rebalance tasks later with the `optimize` prompt plus `optimize_tasks`

### Running a focus session
1. `start_session` against the active plan (a running session is resumed, never duplicated)
2. When the timer ends, `end_session` with the actual minutes, or `cancel_session` if it was abandoned
3. Mark the task with `set_task_done`

### Checking in
- `today_stats`, `weekly_stats`, and `streak` for focus volume
- `insights` for planned-vs-actual and per-subject breakdowns
- `burnout` before committing to a long session; prefer short sessions when the status is not Healthy

## Tool Categories
- **Plan Management**: create_plan, list_plans, get_active_plan, get_plan_tasks, set_plan_active, optimize_tasks
- **Task Management**: set_task_done
- **Session Tracking**: start_session, end_session, cancel_session
- **Analytics**: today_stats, weekly_stats, streak, insights, burnout"#.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.list_prompts(request, context).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.get_prompt(request, context).await
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: StudyflowMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting studyflow MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
