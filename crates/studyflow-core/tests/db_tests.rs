use jiff::Timestamp;
use studyflow_core::{
    models::{SessionMode, SessionStatus},
    params::{CreatePlan, StartSession, TaskDraft, TaskUpdate},
    Database, StudyError,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn plan_params(title: &str, task_titles: &[&str]) -> CreatePlan {
    CreatePlan {
        title: title.to_string(),
        tasks: task_titles
            .iter()
            .map(|t| TaskDraft {
                title: (*t).to_string(),
                ..TaskDraft::default()
            })
            .collect(),
        ..CreatePlan::default()
    }
}

#[test]
fn test_database_initialization() {
    let (_temp_file, _db) = create_test_db();

    // Database should be initialized and ready to use
    assert!(_temp_file.path().exists());
}

#[test]
fn test_create_plan_sets_flag_and_pointer() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Exam Prep", &["Read", "Review"]))
        .expect("Failed to create plan");

    assert!(plan.id > 0);
    assert_eq!(plan.title, "Exam Prep");
    assert!(plan.active);

    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_plan_id, Some(plan.id));

    let tasks = db.get_plan_tasks(plan.id).expect("Failed to get tasks");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].order, 0);
    assert_eq!(tasks[1].order, 1);
}

#[test]
fn test_pointer_writes_are_merge_scoped() {
    let (_temp_file, mut db) = create_test_db();

    db.set_plan_pointer("alice", Some(7))
        .expect("Failed to set plan pointer");
    db.set_session_pointer("alice", Some((42, 1_000, SessionMode::Pomodoro)))
        .expect("Failed to set session pointer");

    // The session write left the plan half alone
    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_plan_id, Some(7));
    assert_eq!(pointer.active_session_id, Some(42));
    assert_eq!(pointer.active_session_started_at_ms, Some(1_000));
    assert_eq!(pointer.active_session_mode, Some(SessionMode::Pomodoro));

    // Clearing the session half keeps the plan half
    db.set_session_pointer("alice", None)
        .expect("Failed to clear session pointer");
    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_plan_id, Some(7));
    assert_eq!(pointer.active_session_id, None);
    assert_eq!(pointer.active_session_started_at_ms, None);
    assert_eq!(pointer.active_session_mode, None);

    // And a plan write keeps the session half
    db.set_session_pointer("alice", Some((43, 2_000, SessionMode::Short)))
        .expect("Failed to set session pointer");
    db.set_plan_pointer("alice", Some(8))
        .expect("Failed to set plan pointer");
    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_plan_id, Some(8));
    assert_eq!(pointer.active_session_id, Some(43));
    assert_eq!(pointer.active_session_mode, Some(SessionMode::Short));
}

#[test]
fn test_create_plan_deactivates_previous() {
    let (_temp_file, mut db) = create_test_db();

    let first = db
        .create_plan("alice", &plan_params("First", &[]))
        .expect("Failed to create plan");
    let second = db
        .create_plan("alice", &plan_params("Second", &[]))
        .expect("Failed to create plan");

    let first_row = db
        .get_plan(first.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert!(!first_row.active);

    let second_row = db
        .get_plan(second.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert!(second_row.active);
}

#[test]
fn test_list_plans_newest_first_active_on_top() {
    let (_temp_file, mut db) = create_test_db();

    let first = db
        .create_plan("alice", &plan_params("First", &[]))
        .expect("Failed to create plan");
    db.create_plan("alice", &plan_params("Second", &[]))
        .expect("Failed to create plan");
    db.create_plan("alice", &plan_params("Third", &[]))
        .expect("Failed to create plan");

    // Re-activate the oldest plan so active-first ordering is observable
    db.set_only_plan_active("alice", first.id)
        .expect("Failed to activate plan");

    let plans = db.list_plans("alice", 10).expect("Failed to list plans");
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].id, first.id);
    assert!(plans[0].active);
    assert_eq!(plans[1].title, "Third");
    assert_eq!(plans[2].title, "Second");
}

#[test]
fn test_list_plans_merges_active_plan_outside_page() {
    let (_temp_file, mut db) = create_test_db();

    let first = db
        .create_plan("alice", &plan_params("Oldest", &[]))
        .expect("Failed to create plan");
    for i in 0..6 {
        db.create_plan("alice", &plan_params(&format!("Filler {i}"), &[]))
            .expect("Failed to create plan");
    }
    db.set_only_plan_active("alice", first.id)
        .expect("Failed to activate plan");

    // Page of 2 misses the oldest row; the pointer merge must surface it
    let plans = db.list_plans("alice", 2).expect("Failed to list plans");
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].id, first.id);
    assert!(plans[0].active);
}

#[test]
fn test_list_plan_summaries_counts_tasks() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Counted", &["A", "B", "C"]))
        .expect("Failed to create plan");
    let tasks = db.get_plan_tasks(plan.id).expect("Failed to get tasks");
    db.set_task_done(tasks[0].id, true, Timestamp::now())
        .expect("Failed to mark task done");

    let summaries = db
        .list_plan_summaries("alice", 10)
        .expect("Failed to list summaries");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_tasks, 3);
    assert_eq!(summaries[0].done_tasks, 1);
}

#[test]
fn test_active_plan_resolution_repairs_cleared_flag() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Pointed", &[]))
        .expect("Failed to create plan");
    db.create_plan("alice", &plan_params("Newest", &[]))
        .expect("Failed to create plan");

    // Pointer names the first plan although its flag was cleared by the
    // second create; resolution must re-flag it
    db.set_plan_pointer("alice", Some(plan.id))
        .expect("Failed to set pointer");

    let resolved = db
        .get_active_plan("alice")
        .expect("Resolution should not fail")
        .expect("Expected an active plan");
    assert_eq!(resolved.id, plan.id);
    assert!(resolved.active);

    let row = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert!(row.active);
}

#[test]
fn test_active_plan_resolution_falls_back_to_flagged_row() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Flagged", &[]))
        .expect("Failed to create plan");

    // Pointer names a plan that no longer exists
    db.set_plan_pointer("alice", Some(99_999))
        .expect("Failed to set pointer");

    let resolved = db
        .get_active_plan("alice")
        .expect("Resolution should not fail")
        .expect("Expected an active plan");
    assert_eq!(resolved.id, plan.id);

    // The pointer was repaired to match
    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_plan_id, Some(plan.id));
}

#[test]
fn test_active_plan_resolution_survives_cleared_pointer() {
    let (_temp_file, mut db) = create_test_db();

    db.create_plan("alice", &plan_params("Older", &[]))
        .expect("Failed to create plan");
    let newest = db
        .create_plan("alice", &plan_params("Newest", &[]))
        .expect("Failed to create plan");

    db.set_plan_pointer("alice", None)
        .expect("Failed to clear pointer");

    let resolved = db
        .get_active_plan("alice")
        .expect("Resolution should not fail")
        .expect("Expected an active plan");
    assert_eq!(resolved.id, newest.id);

    // The pointer was repaired to match the flagged row
    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_plan_id, Some(newest.id));
}

#[test]
fn test_active_plan_resolution_none_for_empty_user() {
    let (_temp_file, mut db) = create_test_db();

    let resolved = db
        .get_active_plan("nobody")
        .expect("Resolution should not fail");
    assert!(resolved.is_none());
}

#[test]
fn test_set_only_plan_active_rejects_foreign_plan() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Hers", &[]))
        .expect("Failed to create plan");

    let result = db.set_only_plan_active("bob", plan.id);
    match result.unwrap_err() {
        StudyError::Forbidden { entity, id } => {
            assert_eq!(entity, "plan");
            assert_eq!(id, plan.id);
        }
        other => panic!("Expected Forbidden, got {other:?}"),
    }

    // Alice's bookkeeping is untouched
    let row = db
        .get_plan(plan.id)
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert!(row.active);
}

#[test]
fn test_set_only_plan_active_missing_plan() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.set_only_plan_active("alice", 999);
    match result.unwrap_err() {
        StudyError::PlanNotFound { id } => assert_eq!(id, 999),
        other => panic!("Expected PlanNotFound, got {other:?}"),
    }
}

#[test]
fn test_set_task_done_toggles_and_stamps() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Tasks", &["Only"]))
        .expect("Failed to create plan");
    let tasks = db.get_plan_tasks(plan.id).expect("Failed to get tasks");

    let done = db
        .set_task_done(tasks[0].id, true, Timestamp::now())
        .expect("Failed to mark done");
    assert!(done.done);
    assert!(done.completed_at.is_some());

    let undone = db
        .set_task_done(tasks[0].id, false, Timestamp::now())
        .expect("Failed to mark undone");
    assert!(!undone.done);
    assert!(undone.completed_at.is_none());
}

#[test]
fn test_set_task_done_missing_task() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.set_task_done(424_242, true, Timestamp::now());
    match result.unwrap_err() {
        StudyError::TaskNotFound { id } => assert_eq!(id, 424_242),
        other => panic!("Expected TaskNotFound, got {other:?}"),
    }
}

#[test]
fn test_apply_task_updates_skips_cross_plan_tasks() {
    let (_temp_file, mut db) = create_test_db();

    let target = db
        .create_plan("alice", &plan_params("Target", &["Mine"]))
        .expect("Failed to create plan");
    let other = db
        .create_plan("alice", &plan_params("Other", &["Theirs"]))
        .expect("Failed to create plan");

    let mine = db.get_plan_tasks(target.id).expect("Failed to get tasks");
    let theirs = db.get_plan_tasks(other.id).expect("Failed to get tasks");

    let updates = vec![
        TaskUpdate {
            task_id: Some(mine[0].id),
            planned_minutes: Some(40),
            ..TaskUpdate::default()
        },
        // Task belongs to a different plan: skipped, not applied
        TaskUpdate {
            task_id: Some(theirs[0].id),
            planned_minutes: Some(5),
            ..TaskUpdate::default()
        },
    ];

    let applied = db
        .apply_task_updates(target.id, &updates, Timestamp::now())
        .expect("Batch should not fail");
    assert_eq!(applied, 1);

    let theirs = db.get_plan_tasks(other.id).expect("Failed to get tasks");
    assert_eq!(theirs[0].planned_minutes, 25);
}

#[test]
fn test_apply_task_updates_skips_field_less_entries() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Target", &["Mine"]))
        .expect("Failed to create plan");
    let tasks = db.get_plan_tasks(plan.id).expect("Failed to get tasks");

    // An id with nothing to change is a no-op, not an applied update
    let updates = vec![TaskUpdate {
        task_id: Some(tasks[0].id),
        ..TaskUpdate::default()
    }];
    let applied = db
        .apply_task_updates(plan.id, &updates, Timestamp::now())
        .expect("Batch should not fail");
    assert_eq!(applied, 0);

    let tasks = db.get_plan_tasks(plan.id).expect("Failed to get tasks");
    assert!(tasks[0].optimized_at.is_none());
}

#[test]
fn test_start_session_inserts_and_points() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Focus", &[]))
        .expect("Failed to create plan");

    let params = StartSession {
        plan_id: plan.id,
        planned_minutes: Some(25),
        subject: Some("math".to_string()),
        ..StartSession::default()
    };
    let (session, reused) = db
        .start_session("alice", &params, SessionMode::Pomodoro, None, Timestamp::now())
        .expect("Failed to start session");

    assert!(!reused);
    assert_eq!(session.status, SessionStatus::Running);
    assert_eq!(session.subject.as_deref(), Some("math"));

    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_session_id, Some(session.id));
}

#[test]
fn test_start_session_reuses_running_session() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Focus", &[]))
        .expect("Failed to create plan");
    let params = StartSession {
        plan_id: plan.id,
        ..StartSession::default()
    };

    let (first, _) = db
        .start_session("alice", &params, SessionMode::Pomodoro, None, Timestamp::now())
        .expect("Failed to start session");
    let (second, reused) = db
        .start_session("alice", &params, SessionMode::Pomodoro, None, Timestamp::now())
        .expect("Duplicate start should succeed");

    assert!(reused);
    assert_eq!(second.id, first.id);
}

#[test]
fn test_start_session_clears_stale_pointer() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Focus", &[]))
        .expect("Failed to create plan");

    // Pointer names a session that does not exist
    db.set_session_pointer("alice", Some((98_765, 0, SessionMode::Pomodoro)))
        .expect("Failed to set pointer");

    let params = StartSession {
        plan_id: plan.id,
        ..StartSession::default()
    };
    let (session, reused) = db
        .start_session("alice", &params, SessionMode::Pomodoro, None, Timestamp::now())
        .expect("Failed to start session");

    assert!(!reused);
    let pointer = db
        .get_pointer("alice")
        .expect("Failed to read pointer")
        .expect("Pointer row should exist");
    assert_eq!(pointer.active_session_id, Some(session.id));
}

#[test]
fn test_start_session_rejects_foreign_plan() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Hers", &[]))
        .expect("Failed to create plan");

    let params = StartSession {
        plan_id: plan.id,
        ..StartSession::default()
    };
    let result = db.start_session("bob", &params, SessionMode::Pomodoro, None, Timestamp::now());
    assert!(matches!(result, Err(StudyError::Forbidden { .. })));
}

#[test]
fn test_start_session_missing_plan() {
    let (_temp_file, mut db) = create_test_db();

    let params = StartSession {
        plan_id: 999,
        ..StartSession::default()
    };
    let result = db.start_session("alice", &params, SessionMode::Pomodoro, None, Timestamp::now());
    match result.unwrap_err() {
        StudyError::PlanNotFound { id } => assert_eq!(id, 999),
        other => panic!("Expected PlanNotFound, got {other:?}"),
    }
}

#[test]
fn test_end_session_writes_terminal_fields() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Focus", &[]))
        .expect("Failed to create plan");
    let (session, _) = db
        .start_session(
            "alice",
            &StartSession {
                plan_id: plan.id,
                ..StartSession::default()
            },
            SessionMode::Pomodoro,
            Some(35),
            Timestamp::now(),
        )
        .expect("Failed to start session");

    let ended = db
        .end_session(session.id, 25, SessionStatus::Completed, Some(50), Timestamp::now())
        .expect("Failed to end session");
    assert_eq!(ended.status, SessionStatus::Completed);
    assert!(ended.completed);
    assert_eq!(ended.duration_minutes, 25);
    assert!(ended.ended_at.is_some());
    assert_eq!(ended.burnout_score_at_start, Some(35));
    assert_eq!(ended.burnout_score_at_end, Some(50));
}

#[test]
fn test_end_session_last_write_wins() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Focus", &[]))
        .expect("Failed to create plan");
    let (session, _) = db
        .start_session(
            "alice",
            &StartSession {
                plan_id: plan.id,
                ..StartSession::default()
            },
            SessionMode::Pomodoro,
            None,
            Timestamp::now(),
        )
        .expect("Failed to start session");

    db.end_session(session.id, 20, SessionStatus::Completed, Some(40), Timestamp::now())
        .expect("First end should succeed");
    let second = db
        .end_session(session.id, 30, SessionStatus::Cancelled, None, Timestamp::now())
        .expect("Repeated end should succeed");

    assert_eq!(second.status, SessionStatus::Cancelled);
    assert!(!second.completed);
    assert_eq!(second.duration_minutes, 30);
    // An absent end score keeps the previously recorded one
    assert_eq!(second.burnout_score_at_end, Some(40));
}

#[test]
fn test_end_session_missing_session() {
    let (_temp_file, mut db) = create_test_db();

    let result = db.end_session(777, 25, SessionStatus::Completed, None, Timestamp::now());
    match result.unwrap_err() {
        StudyError::SessionNotFound { id } => assert_eq!(id, 777),
        other => panic!("Expected SessionNotFound, got {other:?}"),
    }
}

#[test]
fn test_list_sessions_between_is_half_open() {
    let (_temp_file, mut db) = create_test_db();

    let plan = db
        .create_plan("alice", &plan_params("Range", &[]))
        .expect("Failed to create plan");

    let base = Timestamp::from_second(1_700_000_000).unwrap();
    let inside = base.checked_add(jiff::Span::new().hours(1)).unwrap();
    let at_end = base.checked_add(jiff::Span::new().hours(24)).unwrap();

    let params = StartSession {
        plan_id: plan.id,
        ..StartSession::default()
    };
    db.start_session("alice", &params, SessionMode::Pomodoro, None, inside)
        .expect("Failed to start session");
    // The pointer still names the first session; clear it so a second row
    // can be inserted
    db.set_session_pointer("alice", None)
        .expect("Failed to clear pointer");
    db.start_session("alice", &params, SessionMode::Pomodoro, None, at_end)
        .expect("Failed to start session");

    let sessions = db
        .list_sessions_between("alice", base, at_end)
        .expect("Failed to list sessions");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].started_at, inside);
}

#[test]
fn test_sessions_are_scoped_per_user() {
    let (_temp_file, mut db) = create_test_db();

    let alice_plan = db
        .create_plan("alice", &plan_params("Alice", &[]))
        .expect("Failed to create plan");
    let bob_plan = db
        .create_plan("bob", &plan_params("Bob", &[]))
        .expect("Failed to create plan");

    let now = Timestamp::now();
    db.start_session(
        "alice",
        &StartSession {
            plan_id: alice_plan.id,
            ..StartSession::default()
        },
        SessionMode::Pomodoro,
        None,
        now,
    )
    .expect("Failed to start session");
    db.start_session(
        "bob",
        &StartSession {
            plan_id: bob_plan.id,
            ..StartSession::default()
        },
        SessionMode::Pomodoro,
        None,
        now,
    )
    .expect("Failed to start session");

    let start = now.checked_sub(jiff::Span::new().hours(1)).unwrap();
    let end = now.checked_add(jiff::Span::new().hours(1)).unwrap();
    let alice_sessions = db
        .list_sessions_between("alice", start, end)
        .expect("Failed to list sessions");
    assert_eq!(alice_sessions.len(), 1);
    assert_eq!(alice_sessions[0].user_id, "alice");
}

#[test]
fn test_transaction_rollback_on_error() {
    let (_temp_file, mut db) = create_test_db();

    // Starting against a missing plan fails mid-transaction
    let result = db.start_session(
        "alice",
        &StartSession {
            plan_id: 999,
            ..StartSession::default()
        },
        SessionMode::Pomodoro,
        None,
        Timestamp::now(),
    );
    assert!(result.is_err());

    // The database should still be functional
    let plan = db
        .create_plan("alice", &plan_params("After Error", &[]))
        .expect("Should be able to create plan after error");
    assert!(plan.id > 0);
}

#[test]
fn test_duplicate_plan_titles_allowed() {
    let (_temp_file, mut db) = create_test_db();

    let plan1 = db
        .create_plan("alice", &plan_params("Duplicate Title", &[]))
        .expect("Failed to create first plan");
    let plan2 = db
        .create_plan("alice", &plan_params("Duplicate Title", &[]))
        .expect("Failed to create second plan");

    assert_ne!(plan1.id, plan2.id);
    assert_eq!(plan1.title, plan2.title);
}
