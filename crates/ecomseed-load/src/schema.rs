use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::info;

use ecomseed_core::TableName;

use crate::errors::LoadError;

/// `CREATE TABLE` statement for a catalog table.
///
/// Every column is NOT NULL except `orders.ship_date`. Money is REAL,
/// dates are ISO-8601 TEXT.
pub fn create_table_sql(table: TableName) -> &'static str {
    match table {
        TableName::Customers => {
            "CREATE TABLE IF NOT EXISTS customers (
                customer_id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                signup_date TEXT NOT NULL,
                country TEXT NOT NULL
            )"
        }
        TableName::Products => {
            "CREATE TABLE IF NOT EXISTS products (
                product_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                price REAL NOT NULL,
                launch_date TEXT NOT NULL
            )"
        }
        TableName::Orders => {
            "CREATE TABLE IF NOT EXISTS orders (
                order_id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL,
                order_date TEXT NOT NULL,
                ship_date TEXT,
                status TEXT NOT NULL,
                FOREIGN KEY (customer_id) REFERENCES customers (customer_id)
            )"
        }
        TableName::OrderItems => {
            "CREATE TABLE IF NOT EXISTS order_items (
                order_item_id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL,
                product_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL,
                item_price REAL NOT NULL,
                FOREIGN KEY (order_id) REFERENCES orders (order_id),
                FOREIGN KEY (product_id) REFERENCES products (product_id)
            )"
        }
        TableName::Shipments => {
            "CREATE TABLE IF NOT EXISTS shipments (
                shipment_id INTEGER PRIMARY KEY,
                order_id INTEGER NOT NULL,
                shipment_date TEXT NOT NULL,
                carrier TEXT NOT NULL,
                tracking_number TEXT NOT NULL,
                shipment_cost REAL NOT NULL,
                FOREIGN KEY (order_id) REFERENCES orders (order_id)
            )"
        }
    }
}

/// Drop every catalog table (children first) and recreate them
/// (parents first) in one transaction.
pub async fn reset_schema(conn: &mut SqliteConnection) -> Result<(), LoadError> {
    let mut tx = conn.begin().await?;
    for table in TableName::LOAD_ORDER.into_iter().rev() {
        let sql = format!("DROP TABLE IF EXISTS {}", table.as_str());
        sqlx::query(&sql).execute(&mut *tx).await?;
    }
    for table in TableName::LOAD_ORDER {
        sqlx::query(create_table_sql(table)).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!(tables = TableName::LOAD_ORDER.len(), "schema reset");
    Ok(())
}

/// Create any catalog table that does not exist yet.
pub async fn ensure_schema(conn: &mut SqliteConnection) -> Result<(), LoadError> {
    for table in TableName::LOAD_ORDER {
        sqlx::query(create_table_sql(table))
            .execute(&mut *conn)
            .await?;
    }
    info!("schema ensured");
    Ok(())
}

/// Catalog tables absent from the database.
pub async fn missing_tables(conn: &mut SqliteConnection) -> Result<Vec<TableName>, LoadError> {
    let mut missing = Vec::new();
    for table in TableName::LOAD_ORDER {
        let found: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table.as_str())
        .fetch_one(&mut *conn)
        .await?;
        if found == 0 {
            missing.push(table);
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ddl_declares_every_catalog_column() {
        for table in TableName::LOAD_ORDER {
            let sql = create_table_sql(table);
            for column in table.columns() {
                assert!(sql.contains(column), "{table} missing {column}");
            }
            for fk in table.foreign_keys() {
                let clause = format!(
                    "FOREIGN KEY ({}) REFERENCES {} ({})",
                    fk.column,
                    fk.referenced_table.as_str(),
                    fk.referenced_column
                );
                assert!(sql.contains(&clause), "{table} missing {clause}");
            }
        }
    }

    #[test]
    fn only_ship_date_is_nullable() {
        let sql = create_table_sql(TableName::Orders);
        assert!(sql.contains("ship_date TEXT,"));
        assert!(sql.contains("order_date TEXT NOT NULL"));
    }
}
