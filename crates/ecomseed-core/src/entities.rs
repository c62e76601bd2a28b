use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::TableName;
use crate::enums::{Carrier, Category, OrderStatus};

/// A row of one of the catalog tables.
///
/// Field order of each implementor matches `TableName::columns`, so serde's
/// derived CSV header is the interchange header.
pub trait Record {
    const TABLE: TableName;

    fn primary_key(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub signup_date: NaiveDate,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub launch_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub customer_id: i64,
    pub order_date: NaiveDate,
    /// Serialized as an empty field when absent.
    pub ship_date: Option<NaiveDate>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub item_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub shipment_id: i64,
    pub order_id: i64,
    pub shipment_date: NaiveDate,
    pub carrier: Carrier,
    pub tracking_number: String,
    pub shipment_cost: f64,
}

impl Record for Customer {
    const TABLE: TableName = TableName::Customers;

    fn primary_key(&self) -> i64 {
        self.customer_id
    }
}

impl Record for Product {
    const TABLE: TableName = TableName::Products;

    fn primary_key(&self) -> i64 {
        self.product_id
    }
}

impl Record for Order {
    const TABLE: TableName = TableName::Orders;

    fn primary_key(&self) -> i64 {
        self.order_id
    }
}

impl Record for OrderItem {
    const TABLE: TableName = TableName::OrderItems;

    fn primary_key(&self) -> i64 {
        self.order_item_id
    }
}

impl Record for Shipment {
    const TABLE: TableName = TableName::Shipments;

    fn primary_key(&self) -> i64 {
        self.shipment_id
    }
}

/// The five collections produced by one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub shipments: Vec<Shipment>,
}

impl Dataset {
    pub fn row_count(&self, table: TableName) -> usize {
        match table {
            TableName::Customers => self.customers.len(),
            TableName::Products => self.products.len(),
            TableName::Orders => self.orders.len(),
            TableName::OrderItems => self.order_items.len(),
            TableName::Shipments => self.shipments.len(),
        }
    }
}
