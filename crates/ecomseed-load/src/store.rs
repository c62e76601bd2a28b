use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tracing::info;

use crate::errors::LoadError;

/// Exclusive connection to the single-file SQLite store.
///
/// Foreign-key enforcement is switched on when the connection opens and
/// read back from the engine before the store is handed out.
#[derive(Debug)]
pub struct SqliteStore {
    path: PathBuf,
    conn: SqliteConnection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path`.
    pub async fn open(path: &Path) -> Result<Self, LoadError> {
        Self::connect(path, true, true).await
    }

    /// Open an existing database; a missing file is a `MissingInputFile` error.
    pub async fn open_existing(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::MissingInputFile {
                paths: vec![path.to_path_buf()],
            });
        }
        Self::connect(path, false, true).await
    }

    /// Open without foreign-key enforcement. Only meant for repair tooling
    /// and tests that need to plant orphan rows.
    pub async fn open_unchecked(path: &Path) -> Result<Self, LoadError> {
        Self::connect(path, false, false).await
    }

    async fn connect(path: &Path, create: bool, foreign_keys: bool) -> Result<Self, LoadError> {
        if create
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create)
            .foreign_keys(foreign_keys);
        let mut conn = SqliteConnection::connect_with(&options).await?;

        if foreign_keys {
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&mut conn)
                .await?;
            let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
                .fetch_one(&mut conn)
                .await?;
            if enabled != 1 {
                return Err(LoadError::ForeignKeysDisabled);
            }
        } else {
            sqlx::query("PRAGMA foreign_keys = OFF")
                .execute(&mut conn)
                .await?;
        }

        info!(
            database = %path.display(),
            foreign_keys,
            "connected to database"
        );

        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    /// Whether the engine currently enforces foreign keys on this connection.
    pub async fn foreign_keys_enabled(&mut self) -> Result<bool, LoadError> {
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&mut self.conn)
            .await?;
        Ok(enabled == 1)
    }

    /// Close the connection, flushing anything the engine still buffers.
    pub async fn close(self) -> Result<(), LoadError> {
        self.conn.close().await?;
        info!(database = %self.path.display(), "database closed");
        Ok(())
    }
}
