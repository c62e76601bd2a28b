use sqlx::sqlite::SqliteConnection;
use tracing::{info, warn};

use ecomseed_core::IndexDef;

use crate::model::IndexReport;

pub fn create_index_sql(index: &IndexDef) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        index.name,
        index.table.as_str(),
        index.column
    )
}

/// Build each index independently. A failure is recorded and logged but
/// does not stop the remaining indexes.
pub async fn create_indexes(conn: &mut SqliteConnection, indexes: &[IndexDef]) -> Vec<IndexReport> {
    let mut reports = Vec::with_capacity(indexes.len());
    for index in indexes {
        let sql = create_index_sql(index);
        let outcome = sqlx::query(&sql).execute(&mut *conn).await;
        let error = match outcome {
            Ok(_) => {
                info!(index = index.name, table = %index.table, "index created");
                None
            }
            Err(err) => {
                warn!(index = index.name, table = %index.table, error = %err, "index creation failed");
                Some(err.to_string())
            }
        };
        reports.push(IndexReport {
            name: index.name.to_string(),
            table: index.table,
            column: index.column.to_string(),
            created: error.is_none(),
            error,
        });
    }
    reports
}

#[cfg(test)]
mod tests {
    use ecomseed_core::INDEXES;

    use super::*;

    #[test]
    fn renders_idempotent_statement() {
        assert_eq!(
            create_index_sql(&INDEXES[0]),
            "CREATE INDEX IF NOT EXISTS idx_orders_customer_id ON orders (customer_id)"
        );
    }
}
