//! Builder for creating and configuring StudyPlanner instances.

use std::path::{Path, PathBuf};

use jiff::tz::TimeZone;
use tokio::task;

use super::StudyPlanner;
use crate::{
    db::Database,
    error::{Result, StudyError},
};

/// Builder for creating and configuring StudyPlanner instances.
#[derive(Debug, Clone, Default)]
pub struct StudyPlannerBuilder {
    database_path: Option<PathBuf>,
    timezone: Option<TimeZone>,
}

impl StudyPlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/studyflow/studyflow.db` or
    /// `~/.local/share/studyflow/studyflow.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Fixes the timezone used for day bucketing.
    ///
    /// Defaults to the system timezone. All calendar-day boundaries (today's
    /// stats, streaks, weekly series) derive from this one setting.
    pub fn with_timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Parses an IANA timezone name and fixes it for day bucketing.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Configuration` if the name is not a known zone
    pub fn with_timezone_name(self, name: &str) -> Result<Self> {
        let tz = TimeZone::get(name).map_err(|e| StudyError::Configuration {
            message: format!("Unknown timezone '{name}': {e}"),
        })?;
        Ok(self.with_timezone(tz))
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::FileSystem` if the database path is invalid
    /// Returns `StudyError::Database` if database initialization fails
    pub async fn build(self) -> Result<StudyPlanner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };
        let tz = self.timezone.unwrap_or_else(TimeZone::system);

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StudyError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), StudyError>(())
        })
        .await
        .map_err(super::join_error)??;

        Ok(StudyPlanner::new(db_path, tz))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("studyflow")
            .place_data_file("studyflow.db")
            .map_err(|e| StudyError::XdgDirectory(e.to_string()))
    }
}
