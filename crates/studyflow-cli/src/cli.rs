//! Command-line interface definitions using clap
//!
//! This module defines the complete CLI structure using clap's derive API,
//! implementing the parameter wrapper pattern for clean separation between
//! CLI framework concerns and core domain logic.
//!
//! ## Parameter Wrapper Pattern Implementation
//!
//! This module demonstrates the CLI side of the parameter wrapper pattern:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Business Logic
//! ```
//!
//! ### Design Benefits
//!
//! 1. **Framework Isolation**: Core parameter types remain free of
//!    clap-specific attributes and derives, enabling reuse across different
//!    interfaces.
//!
//! 2. **Validation Separation**: CLI-specific validation (argument parsing,
//!    help generation) is handled by clap derives, while business logic
//!    validation remains in the core domain.
//!
//! 3. **Interface Evolution**: CLI can evolve its argument structure (aliases,
//!    help text, validation) without affecting core parameter definitions.
//!
//! Each command defines an `*Args` struct with clap derives plus a `From`
//! conversion into the corresponding core parameter type, so the boundary
//! between CLI concerns and domain logic stays explicit and verifiable at
//! compile time.

use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use studyflow_core::{
    display::{CreateResult, OperationStatus},
    params::{CreatePlan, EndSession, Id, InsightsRange, ListPlans, OptimizeTasks, SetTaskDone,
        StartSession, TaskDraft},
    StudyPlanner,
};

use crate::{extract, renderer::TerminalRenderer};

// ============================================================================
// CLI Argument Wrapper Implementations
// ============================================================================

/// Create a new plan with optional inline tasks
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Task titles to create with the plan (repeatable)
    #[arg(short, long = "task", help = "Task title to add to the plan (repeatable)")]
    pub tasks: Vec<String>,
    /// Subject tag applied to every inline task
    #[arg(short, long, help = "Subject tag applied to every inline task")]
    pub subject: Option<String>,
    /// Self-reported energy level, 1 (drained) to 5
    #[arg(short, long, help = "Self-reported energy level from 1 (drained) to 5")]
    pub energy: Option<i64>,
}

impl From<CreatePlanArgs> for CreatePlan {
    /// Convert CLI arguments to core parameter structure
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            tasks: val
                .tasks
                .into_iter()
                .map(|title| TaskDraft {
                    title,
                    subject: val.subject.clone(),
                    ..TaskDraft::default()
                })
                .collect(),
            input: val
                .energy
                .map(|level| serde_json::json!({ "energyLevel": level })),
            ai_plan: None,
        }
    }
}

/// Import an AI-generated plan from a file or stdin
#[derive(Args)]
pub struct ImportPlanArgs {
    /// Path to the AI reply, or '-' for stdin
    #[arg(help = "File containing the AI reply with the plan JSON, or '-' for stdin")]
    pub file: String,
}

/// List plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Maximum number of plans to show
    #[arg(short, long, help = "Maximum number of plans to show")]
    pub limit: Option<u32>,
}

impl From<ListPlansArgs> for ListPlans {
    fn from(val: ListPlansArgs) -> Self {
        match val.limit {
            Some(limit) => ListPlans { limit },
            None => ListPlans::default(),
        }
    }
}

/// Make a plan the active one
#[derive(Args)]
pub struct ActivatePlanArgs {
    /// ID of the plan to activate
    #[arg(help = "Unique identifier of the plan to make active")]
    pub id: i64,
}

impl From<ActivatePlanArgs> for Id {
    fn from(val: ActivatePlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// List the tasks of a plan
#[derive(Args)]
pub struct PlanTasksArgs {
    /// ID of the plan whose tasks to list
    #[arg(help = "Unique identifier of the plan whose tasks to list")]
    pub id: i64,
}

impl From<PlanTasksArgs> for Id {
    fn from(val: PlanTasksArgs) -> Self {
        Id { id: val.id }
    }
}

/// Apply an optimization batch to a plan's tasks
#[derive(Args)]
pub struct OptimizePlanArgs {
    /// ID of the plan whose tasks to update
    #[arg(help = "Unique identifier of the plan whose tasks to update")]
    pub id: i64,
    /// Path to the AI reply, or '-' for stdin
    #[arg(help = "File containing the AI reply with the task updates, or '-' for stdin")]
    pub file: String,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Import an AI-generated plan from a file or stdin
    #[command(alias = "i")]
    Import(ImportPlanArgs),
    /// List plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show the active plan and its tasks
    #[command(alias = "s")]
    Show,
    /// Make a plan the active one
    #[command(alias = "a")]
    Activate(ActivatePlanArgs),
    /// List the tasks of a plan
    #[command(alias = "t")]
    Tasks(PlanTasksArgs),
    /// Apply an AI optimization batch to a plan's tasks
    #[command(alias = "o")]
    Optimize(OptimizePlanArgs),
}

/// Identify a task by its ID
#[derive(Args)]
pub struct TaskIdArgs {
    /// ID of the task
    #[arg(help = "Unique identifier of the task")]
    pub id: i64,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Mark a task as done
    #[command(alias = "d")]
    Done(TaskIdArgs),
    /// Mark a task as not done
    #[command(alias = "u")]
    Undo(TaskIdArgs),
}

/// Start a focus session
#[derive(Args)]
pub struct StartSessionArgs {
    /// Plan to run the session against. Defaults to the active plan
    #[arg(short, long, help = "Plan to run the session against (defaults to the active plan)")]
    pub plan: Option<i64>,
    /// Task the session focuses on
    #[arg(short, long, help = "Task the session focuses on")]
    pub task: Option<i64>,
    /// Timer mode: pomodoro, short, or long
    #[arg(short, long, help = "Timer mode: pomodoro (default), short, or long")]
    pub mode: Option<String>,
    /// Minutes planned for this session
    #[arg(long, help = "Minutes planned for this session")]
    pub planned: Option<u32>,
    /// Planned minutes after external scaling
    #[arg(long, help = "Planned minutes after external scaling")]
    pub scaled: Option<u32>,
    /// Subject tag for per-subject analytics
    #[arg(short, long, help = "Subject tag for per-subject analytics")]
    pub subject: Option<String>,
}

/// End the running session
#[derive(Args)]
pub struct EndSessionArgs {
    /// ID of the session to end. Defaults to the running session
    #[arg(help = "Session to end (defaults to the running session)")]
    pub id: Option<i64>,
    /// Actual focus minutes
    #[arg(short, long, help = "Actual focus minutes")]
    pub minutes: i64,
    /// Record the session as cancelled instead of completed
    #[arg(long, help = "Record the session as cancelled instead of completed")]
    pub cancelled: bool,
}

/// Cancel the running session
#[derive(Args)]
pub struct CancelSessionArgs {
    /// ID of the session to cancel. Defaults to the running session
    #[arg(help = "Session to cancel (defaults to the running session)")]
    pub id: Option<i64>,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start a focus session against a plan
    #[command(alias = "s")]
    Start(StartSessionArgs),
    /// End the running session with the actual minutes
    #[command(alias = "e")]
    End(EndSessionArgs),
    /// Cancel the running session
    #[command(alias = "c")]
    Cancel(CancelSessionArgs),
    /// Show the running session, if any
    Status,
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Focus minutes and session count for today
    Today,
    /// Per-day focus minutes over the last 7 days
    Week,
    /// Consecutive study days ending today
    Streak,
}

/// Productivity insights over a trailing window
#[derive(Args)]
pub struct InsightsArgs {
    /// Trailing window length in days
    #[arg(short, long, help = "Trailing window length in days (default 7)")]
    pub days: Option<u32>,
}

impl From<InsightsArgs> for InsightsRange {
    fn from(val: InsightsArgs) -> Self {
        match val.days {
            Some(days) => InsightsRange { days },
            None => InsightsRange::default(),
        }
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

/// Command handler binding a planner, a renderer, and one user identity.
///
/// Every method resolves its arguments into core parameters, calls the
/// planner, and renders the resulting markdown.
pub struct Cli {
    planner: StudyPlanner,
    renderer: TerminalRenderer,
    user: String,
}

impl Cli {
    pub fn new(planner: StudyPlanner, renderer: TerminalRenderer, user: String) -> Self {
        Self {
            planner,
            renderer,
            user,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(&args.into()).await,
            PlanCommands::Import(args) => self.import_plan(&args.file).await,
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show => self.show_active_plan().await,
            PlanCommands::Activate(args) => self.activate_plan(&args.into()).await,
            PlanCommands::Tasks(args) => self.plan_tasks(&args.into()).await,
            PlanCommands::Optimize(args) => self.optimize_plan(args.id, &args.file).await,
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let params = match command {
            TaskCommands::Done(args) => SetTaskDone {
                task_id: args.id,
                done: true,
            },
            TaskCommands::Undo(args) => SetTaskDone {
                task_id: args.id,
                done: false,
            },
        };
        let result = self
            .planner
            .set_task_done_result(&self.user, &params)
            .await
            .context("Failed to update task")?;
        self.renderer.render(&result.to_string())
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::Start(args) => self.start_session(args).await,
            SessionCommands::End(args) => self.end_session(args).await,
            SessionCommands::Cancel(args) => self.cancel_session(args.id).await,
            SessionCommands::Status => self.session_status().await,
        }
    }

    pub async fn handle_stats_command(&self, command: StatsCommands) -> Result<()> {
        match command {
            StatsCommands::Today => {
                let stats = self
                    .planner
                    .today_stats(&self.user)
                    .await
                    .context("Failed to compute today's stats")?;
                self.renderer.render(&stats.to_string())
            }
            StatsCommands::Week => {
                let weekly = self
                    .planner
                    .weekly_stats(&self.user)
                    .await
                    .context("Failed to compute weekly stats")?;
                self.renderer.render(&weekly.to_string())
            }
            StatsCommands::Streak => {
                let streak = self
                    .planner
                    .streak_display(&self.user)
                    .await
                    .context("Failed to compute streak")?;
                self.renderer.render(&streak.to_string())
            }
        }
    }

    pub async fn handle_insights(&self, args: InsightsArgs) -> Result<()> {
        let insights = self
            .planner
            .insights(&self.user, &args.into())
            .await
            .context("Failed to compute insights")?;
        self.renderer.render(&insights.to_string())
    }

    pub async fn handle_burnout(&self) -> Result<()> {
        let assessment = self
            .planner
            .burnout(&self.user)
            .await
            .context("Failed to compute burnout score")?;
        self.renderer.render(&assessment.to_string())
    }

    pub async fn create_plan(&self, params: &CreatePlan) -> Result<()> {
        let plan = self
            .planner
            .create_plan(&self.user, params)
            .await
            .context("Failed to create plan")?;
        let result = CreateResult::new(plan);
        self.renderer.render(&result.to_string())
    }

    async fn import_plan(&self, file: &str) -> Result<()> {
        let reply = read_input(file)?;
        let params = extract::study_plan_from_reply(&reply)?;
        self.create_plan(&params).await
    }

    pub async fn list_plans(&self, params: &ListPlans) -> Result<()> {
        let summaries = self
            .planner
            .list_plans_display(&self.user, params)
            .await
            .context("Failed to list plans")?;
        self.renderer
            .render(&format!("# Plans\n\n{summaries}"))
    }

    async fn show_active_plan(&self) -> Result<()> {
        let overview = self
            .planner
            .active_plan_overview(&self.user)
            .await
            .context("Failed to resolve active plan")?;
        match overview {
            Some((plan, tasks)) => self.renderer.render(&format!("{plan}\n{tasks}")),
            None => {
                let status = OperationStatus::success(
                    "No active plan. Create one with `studyflow plan create`.".to_string(),
                );
                self.renderer.render(&status.to_string())
            }
        }
    }

    async fn activate_plan(&self, params: &Id) -> Result<()> {
        let result = self
            .planner
            .activate_plan_result(&self.user, params)
            .await
            .context("Failed to activate plan")?;
        self.renderer.render(&result.to_string())
    }

    async fn plan_tasks(&self, params: &Id) -> Result<()> {
        let tasks = self
            .planner
            .plan_tasks_display(&self.user, params)
            .await
            .context("Failed to list tasks")?;
        self.renderer.render(&tasks.to_string())
    }

    async fn optimize_plan(&self, plan_id: i64, file: &str) -> Result<()> {
        let reply = read_input(file)?;
        let updates = extract::task_updates_from_reply(&reply)?;
        let params = OptimizeTasks { plan_id, updates };
        let result = self
            .planner
            .optimize_tasks_result(&self.user, &params)
            .await
            .context("Failed to optimize tasks")?;
        self.renderer.render(&result.to_string())
    }

    async fn start_session(&self, args: StartSessionArgs) -> Result<()> {
        let plan_id = match args.plan {
            Some(id) => id,
            None => {
                let active = self
                    .planner
                    .get_active_plan(&self.user)
                    .await
                    .context("Failed to resolve active plan")?;
                match active {
                    Some(plan) => plan.id,
                    None => bail!("No active plan. Pass --plan or create one first."),
                }
            }
        };

        // The score is context, not a gate: a failed sample never blocks
        // the start
        let burnout_score = match self.planner.burnout(&self.user).await {
            Ok(assessment) => Some(assessment.score),
            Err(e) => {
                log::warn!("Failed to sample burnout score at session start: {e}");
                None
            }
        };

        let params = StartSession {
            plan_id,
            task_id: args.task,
            mode: args.mode,
            planned_minutes: args.planned,
            scaled_minutes: args.scaled,
            subject: args.subject,
            burnout_score_at_start: burnout_score,
        };
        let result = self
            .planner
            .start_session_result(&self.user, &params)
            .await
            .context("Failed to start session")?;
        self.renderer.render(&result.to_string())
    }

    async fn end_session(&self, args: EndSessionArgs) -> Result<()> {
        let session_id = match args.id {
            Some(id) => id,
            None => self.running_session_id().await?,
        };
        let params = EndSession {
            session_id,
            duration_minutes: args.minutes,
            status: args.cancelled.then(|| "cancelled".to_string()),
            burnout_score_at_end: None,
        };
        let result = self
            .planner
            .end_session_result(&self.user, &params)
            .await
            .context("Failed to end session")?;
        self.renderer.render(&result.to_string())
    }

    async fn cancel_session(&self, id: Option<i64>) -> Result<()> {
        let session_id = match id {
            Some(id) => id,
            None => self.running_session_id().await?,
        };
        let result = self
            .planner
            .cancel_session_result(&self.user, session_id)
            .await
            .context("Failed to cancel session")?;
        self.renderer.render(&result.to_string())
    }

    async fn session_status(&self) -> Result<()> {
        let session = self
            .planner
            .current_session(&self.user)
            .await
            .context("Failed to read running session")?;
        match session {
            Some(session) => self.renderer.render(&session.to_string()),
            None => {
                let status = OperationStatus::success("No running session.".to_string());
                self.renderer.render(&status.to_string())
            }
        }
    }

    async fn running_session_id(&self) -> Result<i64> {
        let session = self
            .planner
            .current_session(&self.user)
            .await
            .context("Failed to read running session")?;
        match session {
            Some(session) => Ok(session.id),
            None => bail!("No running session. Pass a session ID explicitly."),
        }
    }
}

/// Reads the whole input from a file path, or from stdin when it is `-`.
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {file}"))
    }
}
