//! Prompt templates for MCP server

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

/// Get predefined prompt templates for study planning
pub fn prompt_templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate {
            name: "plan".to_string(),
            description: "Generate a structured study plan and store it via studyflow's MCP tools".to_string(),
            template: r#"You are a study coach who turns goals into realistic, well-paced study plans.

# Goal
{goal}

# Your Task
Design a study plan for this goal and store it with studyflow's MCP tools.

# Step 1: Check the Current State
- Use `get_active_plan` to see what the user is currently working on
- Use `burnout` to read the current burnout assessment; a Fatigued or
  Burnout Risk status means the plan must be lighter than usual

# Step 2: Design the Plan
Produce a plan as a single JSON object:

```json
{
  "title": "Concise plan title (5-7 words)",
  "energyLevel": 3,
  "tasks": [
    {
      "title": "[Action Verb] [Specific Topic]",
      "subject": "subject tag for analytics",
      "plannedMinutes": 25,
      "order": 0
    }
  ]
}
```

## Task Guidelines
- 4-8 tasks, each completable in one or two pomodoro sessions (25-50 minutes)
- Front-load the hardest material when energy allows; keep review tasks short
- Tag every task with a subject so per-subject insights stay meaningful
- Order tasks by the sequence they should be studied in

# Step 3: Store the Plan
Call `create_plan` with the object above, passing the full object as aiPlan
so the original generation is preserved. The new plan becomes active
immediately.

# Step 4: Confirm
Call `get_active_plan` and summarize the stored plan for the user, noting
total planned minutes and how that compares to the burnout assessment."#.to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "goal".to_string(),
                    description: "The study goal to build a plan for".to_string(),
                    required: true,
                },
            ],
        },
        PromptTemplate {
            name: "optimize".to_string(),
            description: "Rebalance a plan's tasks from recent analytics via optimize_tasks".to_string(),
            template: r#"You are a study coach rebalancing an existing study plan against how the
user has actually been studying.

# Plan to Optimize
Plan ID: {plan_id}

# Step 1: Gather Evidence
- `get_plan_tasks` with the plan ID to see the current tasks, their planned
  minutes, and what is already done
- `insights` for the planned-vs-actual ratio and per-subject minutes
- `burnout` for the current assessment

# Step 2: Decide the Adjustments
For each task that needs a change, produce an update entry. Only include
fields you want to change:

```json
{
  "updates": [
    {
      "taskId": 7,
      "plannedMinutes": 30,
      "priority": "high",
      "order": 0,
      "note": "why this changed"
    }
  ]
}
```

## Rebalancing Guidelines
- When actual minutes consistently undershoot planned minutes, shrink the
  planned minutes rather than the number of tasks
- When the burnout status is Fatigued or Burnout Risk, cut total planned
  minutes and move lighter review tasks earlier
- Promote tasks in subjects the insights show as neglected
- Leave completed tasks untouched

# Step 3: Apply
Call `optimize_tasks` with the plan ID and the updates array. Entries
without a taskId are skipped, so double-check the IDs against
`get_plan_tasks`.

# Step 4: Confirm
Re-read the tasks with `get_plan_tasks` and summarize what changed and why."#.to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "plan_id".to_string(),
                    description: "The ID of the plan to optimize".to_string(),
                    required: true,
                },
            ],
        },
    ]
}
