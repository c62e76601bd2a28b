use serde::de::DeserializeOwned;
use sqlx::query_builder::Separated;
use sqlx::sqlite::{Sqlite, SqliteConnection};
use sqlx::{Connection, QueryBuilder};
use tracing::debug;

use ecomseed_core::{Customer, Order, OrderItem, Product, Record, Shipment};

use crate::errors::{LoadError, classify_write_error};

/// A record the loader can bind into a multi-row INSERT.
///
/// Values are pushed in `TableName::columns` order.
pub trait LoadRecord: Record + DeserializeOwned {
    fn bind_values<'args>(&'args self, row: &mut Separated<'_, 'args, Sqlite, &'static str>);
}

impl LoadRecord for Customer {
    fn bind_values<'args>(&'args self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.customer_id)
            .push_bind(self.first_name.as_str())
            .push_bind(self.last_name.as_str())
            .push_bind(self.email.as_str())
            .push_bind(self.signup_date)
            .push_bind(self.country.as_str());
    }
}

impl LoadRecord for Product {
    fn bind_values<'args>(&'args self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.product_id)
            .push_bind(self.name.as_str())
            .push_bind(self.category.as_str())
            .push_bind(self.price)
            .push_bind(self.launch_date);
    }
}

impl LoadRecord for Order {
    fn bind_values<'args>(&'args self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.order_id)
            .push_bind(self.customer_id)
            .push_bind(self.order_date)
            .push_bind(self.ship_date)
            .push_bind(self.status.as_str());
    }
}

impl LoadRecord for OrderItem {
    fn bind_values<'args>(&'args self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.order_item_id)
            .push_bind(self.order_id)
            .push_bind(self.product_id)
            .push_bind(self.quantity)
            .push_bind(self.item_price);
    }
}

impl LoadRecord for Shipment {
    fn bind_values<'args>(&'args self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.shipment_id)
            .push_bind(self.order_id)
            .push_bind(self.shipment_date)
            .push_bind(self.carrier.as_str())
            .push_bind(self.tracking_number.as_str())
            .push_bind(self.shipment_cost);
    }
}

/// Insert `rows` in batches of `batch_size` inside one transaction.
///
/// `batch_size` is expected to pass `LoadOptions::validate`. Any constraint
/// failure rolls the whole table back and surfaces as
/// `LoadError::ConstraintViolation`.
pub async fn insert_rows<R: LoadRecord>(
    conn: &mut SqliteConnection,
    rows: &[R],
    batch_size: usize,
) -> Result<u64, LoadError> {
    let table = R::TABLE;
    let prefix = format!(
        "INSERT INTO {} ({}) ",
        table.as_str(),
        table.columns().join(", ")
    );

    let mut tx = conn.begin().await?;
    let mut inserted = 0u64;
    for (batch, chunk) in rows.chunks(batch_size.max(1)).enumerate() {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(prefix.as_str());
        builder.push_values(chunk, |mut row, record| record.bind_values(&mut row));
        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|err| classify_write_error(table, err))?;
        inserted += result.rows_affected();
        debug!(table = %table, batch, rows = chunk.len(), "batch inserted");
    }
    tx.commit().await?;
    Ok(inserted)
}
