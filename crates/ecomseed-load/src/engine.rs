use std::time::Instant;

use sqlx::sqlite::SqliteConnection;
use tracing::{error, info, warn};

use ecomseed_core::{
    Customer, INDEXES, Order, OrderItem, Product, Shipment, TableName, validate_catalog,
};

use crate::analysis::{CustomerProductSummary, customer_product_summary};
use crate::errors::LoadError;
use crate::indexes::create_indexes;
use crate::insert::{LoadRecord, insert_rows};
use crate::integrity::{IntegrityReport, TableCount, row_counts, verify_integrity};
use crate::interchange::{dedupe_by_primary_key, read_table};
use crate::model::{LoadOptions, LoadReport, LoadWarning, TableLoadReport, VerifyReport};
use crate::schema::{ensure_schema, missing_tables, reset_schema};
use crate::store::SqliteStore;

/// Entry point for loading the interchange files into SQLite.
#[derive(Debug, Clone)]
pub struct LoadEngine {
    options: LoadOptions,
}

impl LoadEngine {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Fail with every missing input file before anything is written.
    pub fn preflight(&self) -> Result<(), LoadError> {
        let missing = TableName::LOAD_ORDER
            .into_iter()
            .map(|table| self.options.input_path(table))
            .filter(|path| !path.is_file())
            .collect::<Vec<_>>();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoadError::MissingInputFile { paths: missing })
        }
    }

    /// Create the schema, load every table, build indexes, and verify.
    pub async fn run(&self) -> Result<LoadReport, LoadError> {
        let start = Instant::now();
        let options = &self.options;

        validate_catalog()?;
        options.validate()?;
        self.preflight()?;

        info!(
            input_dir = %options.input_dir.display(),
            database = %options.database.display(),
            reset = options.reset,
            batch_size = options.batch_size,
            "load started"
        );

        let mut store = SqliteStore::open(&options.database).await?;
        let outcome = self.load_into(store.connection()).await;
        let closed = store.close().await;
        let mut report = outcome?;
        closed?;

        report.duration_ms = start.elapsed().as_millis() as u64;
        log_summary(&report.warnings);
        info!(
            status = report.status().status_line(),
            duration_ms = report.duration_ms,
            "load completed"
        );
        Ok(report)
    }

    async fn load_into(&self, conn: &mut SqliteConnection) -> Result<LoadReport, LoadError> {
        if self.options.reset {
            reset_schema(conn).await?;
        } else {
            ensure_schema(conn).await?;
        }

        let mut warnings = Vec::new();
        let mut tables = Vec::with_capacity(TableName::LOAD_ORDER.len());
        for table in TableName::LOAD_ORDER {
            let loaded = match table {
                TableName::Customers => self.load_table::<Customer>(conn, &mut warnings).await,
                TableName::Products => self.load_table::<Product>(conn, &mut warnings).await,
                TableName::Orders => self.load_table::<Order>(conn, &mut warnings).await,
                TableName::OrderItems => self.load_table::<OrderItem>(conn, &mut warnings).await,
                TableName::Shipments => self.load_table::<Shipment>(conn, &mut warnings).await,
            };
            match loaded {
                Ok(report) => tables.push(report),
                Err(err) => {
                    error!(
                        table = %table,
                        file = %self.options.input_path(table).display(),
                        error = %err,
                        "table load failed"
                    );
                    return Err(err);
                }
            }
        }

        let indexes = create_indexes(conn, &INDEXES).await;
        warnings.extend(
            indexes
                .iter()
                .filter_map(|index| {
                    index.error.as_ref().map(|message| LoadWarning::IndexCreationFailed {
                        index: index.name.clone(),
                        message: message.clone(),
                    })
                }),
        );

        let row_counts = row_counts(conn).await?;
        let integrity = verify_integrity(conn).await?;
        warnings.extend(integrity.warnings());

        Ok(LoadReport {
            database: self.options.database.clone(),
            reset: self.options.reset,
            tables,
            indexes,
            row_counts,
            integrity,
            warnings,
            duration_ms: 0,
        })
    }

    async fn load_table<R: LoadRecord>(
        &self,
        conn: &mut SqliteConnection,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<TableLoadReport, LoadError> {
        let table = R::TABLE;
        let path = self.options.input_path(table);

        let rows: Vec<R> = read_table(&path)?;
        let rows_read = rows.len() as u64;
        let (rows, duplicates_removed) = dedupe_by_primary_key(rows);
        if duplicates_removed > 0 {
            warn!(
                table = %table,
                removed = duplicates_removed,
                "duplicate primary keys removed"
            );
            warnings.push(LoadWarning::DuplicateKeys {
                table,
                removed: duplicates_removed,
            });
        }

        let rows_inserted = insert_rows(conn, &rows, self.options.batch_size).await?;
        info!(table = %table, rows = rows_inserted, "table loaded");

        Ok(TableLoadReport {
            table,
            file: path,
            rows_read,
            duplicates_removed,
            rows_inserted,
        })
    }

    /// Row counts and integrity of an existing database, without writing.
    pub async fn verify(&self) -> Result<VerifyReport, LoadError> {
        let mut store = SqliteStore::open_existing(&self.options.database).await?;
        let outcome = verify_existing(store.connection()).await;
        let closed = store.close().await;
        let (row_counts, integrity) = outcome?;
        closed?;

        let warnings = integrity.warnings();
        log_summary(&warnings);
        let report = VerifyReport {
            database: self.options.database.clone(),
            row_counts,
            integrity,
            warnings,
        };
        info!(status = report.status().status_line(), "verification completed");
        Ok(report)
    }

    /// Run the customer x product summary against an existing database.
    pub async fn analyze(&self, limit: u32) -> Result<Vec<CustomerProductSummary>, LoadError> {
        let mut store = SqliteStore::open_existing(&self.options.database).await?;
        let outcome = analyze_existing(store.connection(), limit).await;
        let closed = store.close().await;
        let rows = outcome?;
        closed?;
        info!(rows = rows.len(), limit, "analysis completed");
        Ok(rows)
    }
}

async fn require_schema(conn: &mut SqliteConnection) -> Result<(), LoadError> {
    let tables = missing_tables(conn).await?;
    if tables.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingTables { tables })
    }
}

async fn verify_existing(
    conn: &mut SqliteConnection,
) -> Result<(Vec<TableCount>, IntegrityReport), LoadError> {
    require_schema(conn).await?;
    let counts = row_counts(conn).await?;
    let integrity = verify_integrity(conn).await?;
    Ok((counts, integrity))
}

async fn analyze_existing(
    conn: &mut SqliteConnection,
    limit: u32,
) -> Result<Vec<CustomerProductSummary>, LoadError> {
    require_schema(conn).await?;
    customer_product_summary(conn, limit).await
}

fn log_summary(warnings: &[LoadWarning]) {
    if warnings.is_empty() {
        info!("no warnings");
        return;
    }
    for warning in warnings {
        match warning {
            LoadWarning::DuplicateKeys { table, removed } => {
                warn!(code = warning.code(), table = %table, removed, "warning")
            }
            LoadWarning::IndexCreationFailed { index, message } => {
                warn!(code = warning.code(), index = %index, message = %message, "warning")
            }
            LoadWarning::OrphanRows {
                relationship,
                orphans,
            } => warn!(
                code = warning.code(),
                relationship = %relationship,
                orphans,
                "warning"
            ),
        }
    }
    warn!(count = warnings.len(), "completed with warnings");
}
