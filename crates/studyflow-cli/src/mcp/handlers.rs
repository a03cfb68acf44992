//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    service::RequestContext,
    ErrorData, ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::Deserialize;
use studyflow_core::{
    display::{CreateResult, OperationStatus},
    params as core, StudyPlanner,
};
use tokio::sync::Mutex;

use super::{prompts::prompt_templates, to_mcp_error};

// ============================================================================
// Generic Parameter Wrapper Implementation
// ============================================================================
//
// This generic wrapper struct implements the parameter wrapper pattern by:
// 1. Wrapping any core parameter type in a transparent serde container
// 2. Adding MCP-specific derives (Deserialize, JsonSchema) for JSON handling
// 3. Keeping the core types clean of framework dependencies
//
// The #[serde(transparent)] attribute ensures that
// serialization/deserialization passes through directly to the wrapped core
// type, maintaining API compatibility while adding the necessary trait
// implementations for MCP protocol handling.

/// Generic MCP wrapper for core parameter types with serde integration
///
/// Provides JSON deserialization and schema generation for any parameter type,
/// eliminating the need for individual wrapper structs while maintaining
/// the same functionality and type safety.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type OptimizeTasks = McpParams<core::OptimizeTasks>;
pub type SetTaskDone = McpParams<core::SetTaskDone>;
pub type StartSession = McpParams<core::StartSession>;
pub type EndSession = McpParams<core::EndSession>;
pub type InsightsRange = McpParams<core::InsightsRange>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<StudyPlanner>>,
    user: Arc<String>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<StudyPlanner>>, user: Arc<String>) -> Self {
        Self { planner, user }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {:?}", params);

        let plan = self
            .planner
            .lock()
            .await
            .create_plan(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        text_result(CreateResult::new(plan).to_string())
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {:?}", params);

        let summaries = self
            .planner
            .lock()
            .await
            .list_plans_display(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        if summaries.is_empty() {
            text_result(OperationStatus::success("No plans found".to_string()).to_string())
        } else {
            text_result(format!("# Plans\n\n{summaries}"))
        }
    }

    pub async fn get_active_plan(&self) -> McpResult {
        debug!("get_active_plan");

        let overview = self
            .planner
            .lock()
            .await
            .active_plan_overview(&self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to resolve active plan", &e))?;

        match overview {
            Some((plan, tasks)) => text_result(format!("{plan}\n{tasks}")),
            None => text_result(
                OperationStatus::success("No active plan. Create one with create_plan.".to_string())
                    .to_string(),
            ),
        }
    }

    pub async fn get_plan_tasks(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("get_plan_tasks: {:?}", params);

        let tasks = self
            .planner
            .lock()
            .await
            .plan_tasks_display(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list tasks", &e))?;

        text_result(tasks.to_string())
    }

    pub async fn set_plan_active(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("set_plan_active: {:?}", params);

        let result = self
            .planner
            .lock()
            .await
            .activate_plan_result(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to activate plan", &e))?;

        text_result(result.to_string())
    }

    pub async fn optimize_tasks(&self, Parameters(params): Parameters<OptimizeTasks>) -> McpResult {
        debug!("optimize_tasks: {:?}", params);

        let result = self
            .planner
            .lock()
            .await
            .optimize_tasks_result(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to optimize tasks", &e))?;

        text_result(result.to_string())
    }

    pub async fn set_task_done(&self, Parameters(params): Parameters<SetTaskDone>) -> McpResult {
        debug!("set_task_done: {:?}", params);

        let result = self
            .planner
            .lock()
            .await
            .set_task_done_result(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;

        text_result(result.to_string())
    }

    pub async fn start_session(&self, Parameters(params): Parameters<StartSession>) -> McpResult {
        debug!("start_session: {:?}", params);

        let result = self
            .planner
            .lock()
            .await
            .start_session_result(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to start session", &e))?;

        text_result(result.to_string())
    }

    pub async fn end_session(&self, Parameters(params): Parameters<EndSession>) -> McpResult {
        debug!("end_session: {:?}", params);

        let result = self
            .planner
            .lock()
            .await
            .end_session_result(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to end session", &e))?;

        text_result(result.to_string())
    }

    pub async fn cancel_session(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("cancel_session: {:?}", params);

        let result = self
            .planner
            .lock()
            .await
            .cancel_session_result(&self.user, params.as_ref().id)
            .await
            .map_err(|e| to_mcp_error("Failed to cancel session", &e))?;

        text_result(result.to_string())
    }

    pub async fn today_stats(&self) -> McpResult {
        debug!("today_stats");

        let stats = self
            .planner
            .lock()
            .await
            .today_stats(&self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to compute today's stats", &e))?;

        text_result(stats.to_string())
    }

    pub async fn weekly_stats(&self) -> McpResult {
        debug!("weekly_stats");

        let weekly = self
            .planner
            .lock()
            .await
            .weekly_stats(&self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to compute weekly stats", &e))?;

        text_result(weekly.to_string())
    }

    pub async fn streak(&self) -> McpResult {
        debug!("streak");

        let streak = self
            .planner
            .lock()
            .await
            .streak_display(&self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to compute streak", &e))?;

        text_result(streak.to_string())
    }

    pub async fn insights(&self, Parameters(params): Parameters<InsightsRange>) -> McpResult {
        debug!("insights: {:?}", params);

        let insights = self
            .planner
            .lock()
            .await
            .insights(&self.user, params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to compute insights", &e))?;

        text_result(insights.to_string())
    }

    pub async fn burnout(&self) -> McpResult {
        debug!("burnout");

        let assessment = self
            .planner
            .lock()
            .await
            .burnout(&self.user)
            .await
            .map_err(|e| to_mcp_error("Failed to compute burnout score", &e))?;

        text_result(assessment.to_string())
    }

    /// List all available prompts
    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        debug!("list_prompts");

        let prompts = prompt_templates()
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                title: None,
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    /// Get a specific prompt by name and apply arguments
    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("get_prompt: {}", request.name);

        let templates = prompt_templates();
        let template = templates
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| McpError::invalid_params("Prompt not found", None))?;

        let mut prompt_text = template.template.clone();

        // Apply argument substitution if arguments are provided
        if let Some(args) = &request.arguments {
            for arg_def in &template.arguments {
                if let Some(arg_value) = args.get(&arg_def.name) {
                    if let Some(arg_str) = arg_value.as_str() {
                        let placeholder = format!("{{{}}}", arg_def.name);
                        prompt_text = prompt_text.replace(&placeholder, arg_str);
                    } else if arg_def.required {
                        return Err(McpError::invalid_params(
                            format!("Argument '{}' must be a string", arg_def.name),
                            None,
                        ));
                    }
                } else if arg_def.required {
                    return Err(McpError::invalid_params(
                        format!("Required argument '{}' is missing", arg_def.name),
                        None,
                    ));
                }
            }
        } else {
            // Check if any required arguments are missing
            let required_args: Vec<_> = template
                .arguments
                .iter()
                .filter(|arg| arg.required)
                .map(|arg| arg.name.as_str())
                .collect();
            if !required_args.is_empty() {
                return Err(McpError::invalid_params(
                    format!("Required arguments missing: {}", required_args.join(", ")),
                    None,
                ));
            }
        }

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
