use std::path::PathBuf;

use thiserror::Error;

use ecomseed_core::TableName;

/// Fatal errors emitted by the loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("missing input file(s): {}", display_paths(.paths))]
    MissingInputFile { paths: Vec<PathBuf> },
    /// The store rejected a write because it breaks a declared constraint.
    #[error("{kind} constraint violated while loading {table}: {message}")]
    ConstraintViolation {
        table: TableName,
        kind: &'static str,
        message: String,
    },
    #[error("database is missing table(s): {}", display_tables(.tables))]
    MissingTables { tables: Vec<TableName> },
    #[error("foreign key enforcement could not be enabled")]
    ForeignKeysDisabled,
    #[error("unexpected header in {}: expected [{expected}], found [{found}]", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Interchange {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("catalog error: {0}")]
    Catalog(#[from] ecomseed_core::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn display_tables(tables: &[TableName]) -> String {
    tables
        .iter()
        .map(|table| table.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Map a write error to `ConstraintViolation` when the engine reports one.
pub fn classify_write_error(table: TableName, err: sqlx::Error) -> LoadError {
    if let sqlx::Error::Database(db_err) = &err {
        let kind = if db_err.is_foreign_key_violation() {
            Some("foreign key")
        } else if db_err.is_unique_violation() {
            Some("primary key")
        } else {
            None
        };
        if let Some(kind) = kind {
            return LoadError::ConstraintViolation {
                table,
                kind,
                message: db_err.message().to_string(),
            };
        }
    }
    LoadError::Database(err)
}
