use serde::Serialize;
use sqlx::sqlite::SqliteConnection;

use crate::errors::LoadError;

/// One customer x product aggregate row.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct CustomerProductSummary {
    pub customer_id: i64,
    pub customer_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub category: String,
    pub order_count: i64,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub first_order_date: String,
    pub most_recent_order_date: String,
    pub total_shipping_cost: f64,
}

// Shipment cost is summed per order, then once per distinct order of each
// customer x product pair.
const CUSTOMER_PRODUCT_SUMMARY: &str = "
    WITH order_shipping AS (
        SELECT order_id, SUM(shipment_cost) AS shipping_cost
        FROM shipments
        GROUP BY order_id
    ),
    pair_orders AS (
        SELECT DISTINCT o.customer_id, oi.product_id, o.order_id
        FROM order_items oi
        JOIN orders o ON o.order_id = oi.order_id
    ),
    pair_shipping AS (
        SELECT po.customer_id, po.product_id,
            COALESCE(SUM(os.shipping_cost), 0.0) AS shipping_cost
        FROM pair_orders po
        LEFT JOIN order_shipping os ON os.order_id = po.order_id
        GROUP BY po.customer_id, po.product_id
    )
    SELECT
        c.customer_id AS customer_id,
        c.first_name || ' ' || c.last_name AS customer_name,
        p.product_id AS product_id,
        p.name AS product_name,
        p.category AS category,
        COUNT(DISTINCT o.order_id) AS order_count,
        SUM(oi.quantity) AS total_quantity,
        ROUND(SUM(oi.quantity * oi.item_price), 2) AS total_revenue,
        MIN(o.order_date) AS first_order_date,
        MAX(o.order_date) AS most_recent_order_date,
        ROUND(MAX(ps.shipping_cost), 2) AS total_shipping_cost
    FROM order_items oi
    JOIN orders o ON o.order_id = oi.order_id
    JOIN customers c ON c.customer_id = o.customer_id
    JOIN products p ON p.product_id = oi.product_id
    JOIN pair_shipping ps
        ON ps.customer_id = c.customer_id AND ps.product_id = p.product_id
    GROUP BY c.customer_id, p.product_id
    ORDER BY total_revenue DESC, c.customer_id, p.product_id
    LIMIT ?
";

/// Top `limit` customer x product pairs by revenue.
pub async fn customer_product_summary(
    conn: &mut SqliteConnection,
    limit: u32,
) -> Result<Vec<CustomerProductSummary>, LoadError> {
    let rows = sqlx::query_as::<_, CustomerProductSummary>(CUSTOMER_PRODUCT_SUMMARY)
        .bind(i64::from(limit))
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}
