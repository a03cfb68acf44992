use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag for testing
fn studyflow_cmd(db_path: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("studyflow").expect("Failed to find studyflow binary");
    cmd.arg("--no-color")
        .arg("--timezone")
        .arg("UTC")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

#[test]
fn test_cli_create_plan_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "Linear Algebra Finals"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("Linear Algebra Finals"));
}

#[test]
fn test_cli_create_plan_with_inline_tasks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args([
            "plan",
            "create",
            "Chemistry Week",
            "--task",
            "Stoichiometry drills",
            "--task",
            "Lab report review",
            "--subject",
            "chemistry",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"));

    studyflow_cmd(&db_path)
        .args(["plan", "tasks", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stoichiometry drills"))
        .stdout(predicate::str::contains("Lab report review"));
}

#[test]
fn test_cli_create_plan_rejects_empty_title() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "   "])
        .assert()
        .failure();
}

#[test]
fn test_cli_plan_import_from_stdin() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let reply = r#"Here is your study plan:
```json
{
  "title": "Imported Exam Prep",
  "energyLevel": 2,
  "tasks": [
    {"title": "Past paper 2019", "subject": "math", "plannedMinutes": 50}
  ]
}
```
Good luck!"#;

    studyflow_cmd(&db_path)
        .args(["plan", "import", "-"])
        .write_stdin(reply)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with ID: 1"))
        .stdout(predicate::str::contains("Imported Exam Prep"));

    studyflow_cmd(&db_path)
        .args(["plan", "tasks", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Past paper 2019"));
}

#[test]
fn test_cli_plan_import_rejects_reply_without_json() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "import", "-"])
        .write_stdin("sorry, I could not come up with a plan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No JSON object"));
}

#[test]
fn test_cli_list_shows_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "First Plan"])
        .assert()
        .success();
    studyflow_cmd(&db_path)
        .args(["plan", "create", "Second Plan"])
        .assert()
        .success();

    studyflow_cmd(&db_path)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plans"))
        .stdout(predicate::str::contains("First Plan"))
        .stdout(predicate::str::contains("Second Plan"));
}

#[test]
fn test_cli_default_command_lists_plans() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "Default Listing"])
        .assert()
        .success();

    studyflow_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Default Listing"));
}

#[test]
fn test_cli_plan_show_reflects_activation() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "Old Plan"])
        .assert()
        .success();
    studyflow_cmd(&db_path)
        .args(["plan", "create", "New Plan"])
        .assert()
        .success();

    // creation makes the newest plan active
    studyflow_cmd(&db_path)
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New Plan"));

    studyflow_cmd(&db_path)
        .args(["plan", "activate", "1"])
        .assert()
        .success();

    studyflow_cmd(&db_path)
        .args(["plan", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old Plan"));
}

#[test]
fn test_cli_activate_nonexistent_plan_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "activate", "404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"));
}

#[test]
fn test_cli_plan_optimize_from_stdin() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "Optimizable", "--task", "Read chapter 4"])
        .assert()
        .success();

    let reply = r#"{"updates": [{"taskId": 1, "plannedMinutes": 40, "priority": "high"}]}"#;

    studyflow_cmd(&db_path)
        .args(["plan", "optimize", "1", "-"])
        .write_stdin(reply)
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 1 update(s) to plan 1"));
}

#[test]
fn test_cli_task_done_and_undo() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "Task Plan", "--task", "Flashcards"])
        .assert()
        .success();

    studyflow_cmd(&db_path)
        .args(["task", "done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task with ID: 1"))
        .stdout(predicate::str::contains("Done"));

    studyflow_cmd(&db_path)
        .args(["task", "undo", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo"));
}

#[test]
fn test_cli_task_done_missing_task_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["task", "done", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_cli_session_lifecycle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "Session Plan"])
        .assert()
        .success();

    // start defaults to the active plan
    studyflow_cmd(&db_path)
        .args(["session", "start", "--subject", "math"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started session with ID: 1"));

    // a second start resumes instead of duplicating
    studyflow_cmd(&db_path)
        .args(["session", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resumed running session with ID: 1"));

    studyflow_cmd(&db_path)
        .args(["session", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session 1"));

    // end defaults to the running session
    studyflow_cmd(&db_path)
        .args(["session", "end", "--minutes", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ended session 1 (completed)"));

    studyflow_cmd(&db_path)
        .args(["session", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No running session"));

    studyflow_cmd(&db_path)
        .args(["stats", "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25"));

    studyflow_cmd(&db_path)
        .args(["stats", "streak"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 1 day(s)"));
}

#[test]
fn test_cli_session_end_without_running_session_fails() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["session", "end", "--minutes", "25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No running session"));
}

#[test]
fn test_cli_session_cancel_leaves_no_stats() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["plan", "create", "Cancel Plan"])
        .assert()
        .success();
    studyflow_cmd(&db_path)
        .args(["session", "start"])
        .assert()
        .success();

    studyflow_cmd(&db_path)
        .args(["session", "cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));

    studyflow_cmd(&db_path)
        .args(["stats", "streak"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak: 0 day(s)"));
}

#[test]
fn test_cli_users_are_isolated() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["--user", "alice", "plan", "create", "Alice Plan"])
        .assert()
        .success();

    studyflow_cmd(&db_path)
        .args(["--user", "bob", "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Plan").not());

    // bob cannot activate alice's plan
    studyflow_cmd(&db_path)
        .args(["--user", "bob", "plan", "activate", "1"])
        .assert()
        .failure();
}

#[test]
fn test_cli_stats_week_and_insights_render() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["stats", "week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last 7 Days"));

    studyflow_cmd(&db_path)
        .args(["insights", "--days", "14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insights (last 14 days)"));
}

#[test]
fn test_cli_burnout_for_fresh_user() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    studyflow_cmd(&db_path)
        .args(["burnout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Burnout Check"))
        .stdout(predicate::str::contains("Healthy"));
}

#[test]
fn test_cli_rejects_unknown_timezone() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    let mut cmd = Command::cargo_bin("studyflow").expect("Failed to find studyflow binary");
    cmd.arg("--no-color")
        .arg("--timezone")
        .arg("Mars/Olympus")
        .arg("--database-file")
        .arg(&db_path)
        .args(["plan", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timezone"));
}
