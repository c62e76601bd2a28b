use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use ecomseed_core::TableName;

use crate::errors::LoadError;
use crate::integrity::{IntegrityReport, TableCount};

/// Status line printed when a run aborts.
pub const FAILED_STATUS_LINE: &str = "STATUS: FAILED";

/// Host parameters SQLite accepts in one statement.
pub const SQLITE_MAX_VARIABLES: usize = 32_766;

/// Options for the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Directory holding the five interchange files.
    pub input_dir: PathBuf,
    /// SQLite database file.
    pub database: PathBuf,
    /// Drop and recreate every table before loading.
    pub reset: bool,
    /// Rows per multi-row INSERT statement.
    pub batch_size: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            database: PathBuf::from("ecommerce.db"),
            reset: true,
            batch_size: 150,
        }
    }
}

impl LoadOptions {
    pub fn input_path(&self, table: TableName) -> PathBuf {
        self.input_dir.join(table.file_name())
    }

    /// Largest `batch_size` whose widest INSERT stays within
    /// `SQLITE_MAX_VARIABLES`.
    pub fn max_batch_size() -> usize {
        let widest = TableName::LOAD_ORDER
            .into_iter()
            .map(|table| table.columns().len())
            .max()
            .unwrap_or(1);
        SQLITE_MAX_VARIABLES / widest
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        let max = Self::max_batch_size();
        if self.batch_size == 0 || self.batch_size > max {
            return Err(LoadError::InvalidOptions(format!(
                "batch_size must be between 1 and {max}, got {}",
                self.batch_size
            )));
        }
        Ok(())
    }
}

/// Per-table load statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableLoadReport {
    pub table: TableName,
    pub file: PathBuf,
    pub rows_read: u64,
    pub duplicates_removed: u64,
    pub rows_inserted: u64,
}

/// Outcome of a single `CREATE INDEX`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexReport {
    pub name: String,
    pub table: TableName,
    pub column: String,
    pub created: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Non-fatal findings accumulated during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    DuplicateKeys { table: TableName, removed: u64 },
    IndexCreationFailed { index: String, message: String },
    OrphanRows { relationship: String, orphans: u64 },
}

impl LoadWarning {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateKeys { .. } => "duplicate_keys",
            Self::IndexCreationFailed { .. } => "index_creation_failed",
            Self::OrphanRows { .. } => "orphan_rows",
        }
    }
}

/// Final outcome of a run that did not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    CompletedWithWarnings,
}

impl RunStatus {
    pub fn status_line(self) -> &'static str {
        match self {
            Self::Success => "STATUS: SUCCESS",
            Self::CompletedWithWarnings => "STATUS: COMPLETED_WITH_WARNINGS",
        }
    }
}

fn status_for(integrity: &IntegrityReport, warnings: &[LoadWarning]) -> RunStatus {
    if integrity.all_passed() && warnings.is_empty() {
        RunStatus::Success
    } else {
        RunStatus::CompletedWithWarnings
    }
}

/// Report for a full load run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadReport {
    pub database: PathBuf,
    pub reset: bool,
    pub tables: Vec<TableLoadReport>,
    pub indexes: Vec<IndexReport>,
    pub row_counts: Vec<TableCount>,
    pub integrity: IntegrityReport,
    pub warnings: Vec<LoadWarning>,
    pub duration_ms: u64,
}

impl LoadReport {
    pub fn status(&self) -> RunStatus {
        status_for(&self.integrity, &self.warnings)
    }

    pub fn table(&self, table: TableName) -> Option<&TableLoadReport> {
        self.tables.iter().find(|report| report.table == table)
    }

    pub fn row_count(&self, table: TableName) -> Option<u64> {
        self.row_counts
            .iter()
            .find(|count| count.table == table)
            .map(|count| count.rows)
    }
}

/// Report for a verify-only run against an existing database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub database: PathBuf,
    pub row_counts: Vec<TableCount>,
    pub integrity: IntegrityReport,
    pub warnings: Vec<LoadWarning>,
}

impl VerifyReport {
    pub fn status(&self) -> RunStatus {
        status_for(&self.integrity, &self.warnings)
    }
}
