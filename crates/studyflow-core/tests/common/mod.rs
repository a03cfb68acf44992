use jiff::tz::TimeZone;
use studyflow_core::StudyPlannerBuilder;
use tempfile::TempDir;

/// Helper function to create a test planner pinned to UTC
pub async fn create_test_planner() -> (TempDir, studyflow_core::StudyPlanner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = StudyPlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_timezone(TimeZone::UTC)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
