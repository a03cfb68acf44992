//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result, StudyError};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        // Execute the schema SQL
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        // Apply migrations for existing databases
        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Check if scaled_minutes column exists in sessions table
        let has_scaled_minutes_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('sessions') WHERE name = 'scaled_minutes'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .unwrap_or(false);

        // Add scaled_minutes column if it doesn't exist
        if !has_scaled_minutes_column {
            self.connection
                .execute("ALTER TABLE sessions ADD COLUMN scaled_minutes INTEGER", [])
                .map_err(|e| {
                    StudyError::database_error(
                        "Failed to add scaled_minutes column to sessions table",
                        e,
                    )
                })?;
        }

        Ok(())
    }
}
