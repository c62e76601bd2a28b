use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The five tables of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Customers,
    Products,
    Orders,
    OrderItems,
    Shipments,
}

impl TableName {
    /// Parents before children.
    pub const LOAD_ORDER: [TableName; 5] = [
        TableName::Customers,
        TableName::Products,
        TableName::Orders,
        TableName::OrderItems,
        TableName::Shipments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::OrderItems => "order_items",
            Self::Shipments => "shipments",
        }
    }

    /// Interchange file name for the table.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Customers => "customers.csv",
            Self::Products => "products.csv",
            Self::Orders => "orders.csv",
            Self::OrderItems => "order_items.csv",
            Self::Shipments => "shipments.csv",
        }
    }

    pub fn primary_key(self) -> &'static str {
        match self {
            Self::Customers => "customer_id",
            Self::Products => "product_id",
            Self::Orders => "order_id",
            Self::OrderItems => "order_item_id",
            Self::Shipments => "shipment_id",
        }
    }

    /// Column names in storage and header order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Customers => &[
                "customer_id",
                "first_name",
                "last_name",
                "email",
                "signup_date",
                "country",
            ],
            Self::Products => &["product_id", "name", "category", "price", "launch_date"],
            Self::Orders => &["order_id", "customer_id", "order_date", "ship_date", "status"],
            Self::OrderItems => &[
                "order_item_id",
                "order_id",
                "product_id",
                "quantity",
                "item_price",
            ],
            Self::Shipments => &[
                "shipment_id",
                "order_id",
                "shipment_date",
                "carrier",
                "tracking_number",
                "shipment_cost",
            ],
        }
    }

    /// Foreign keys declared on this table.
    pub fn foreign_keys(self) -> impl Iterator<Item = &'static ForeignKey> {
        FOREIGN_KEYS.iter().filter(move |fk| fk.table == self)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TableName::LOAD_ORDER
            .into_iter()
            .find(|table| table.as_str() == value)
            .ok_or_else(|| Error::UnknownTable(value.to_string()))
    }
}

/// Single-column foreign key between two catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    /// Human label used in integrity reports.
    pub label: &'static str,
    pub table: TableName,
    pub column: &'static str,
    pub referenced_table: TableName,
    pub referenced_column: &'static str,
}

/// Every foreign-key relationship, in the order integrity checks report them.
pub const FOREIGN_KEYS: [ForeignKey; 4] = [
    ForeignKey {
        label: "Orders -> Customers",
        table: TableName::Orders,
        column: "customer_id",
        referenced_table: TableName::Customers,
        referenced_column: "customer_id",
    },
    ForeignKey {
        label: "Order Items -> Orders",
        table: TableName::OrderItems,
        column: "order_id",
        referenced_table: TableName::Orders,
        referenced_column: "order_id",
    },
    ForeignKey {
        label: "Order Items -> Products",
        table: TableName::OrderItems,
        column: "product_id",
        referenced_table: TableName::Products,
        referenced_column: "product_id",
    },
    ForeignKey {
        label: "Shipments -> Orders",
        table: TableName::Shipments,
        column: "order_id",
        referenced_table: TableName::Orders,
        referenced_column: "order_id",
    },
];

/// Non-unique secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub table: TableName,
    pub column: &'static str,
}

/// Indexes built after load: FK columns first, then filter columns.
pub const INDEXES: [IndexDef; 8] = [
    IndexDef {
        name: "idx_orders_customer_id",
        table: TableName::Orders,
        column: "customer_id",
    },
    IndexDef {
        name: "idx_order_items_order_id",
        table: TableName::OrderItems,
        column: "order_id",
    },
    IndexDef {
        name: "idx_order_items_product_id",
        table: TableName::OrderItems,
        column: "product_id",
    },
    IndexDef {
        name: "idx_shipments_order_id",
        table: TableName::Shipments,
        column: "order_id",
    },
    IndexDef {
        name: "idx_customers_email",
        table: TableName::Customers,
        column: "email",
    },
    IndexDef {
        name: "idx_products_category",
        table: TableName::Products,
        column: "category",
    },
    IndexDef {
        name: "idx_orders_status",
        table: TableName::Orders,
        column: "status",
    },
    IndexDef {
        name: "idx_orders_order_date",
        table: TableName::Orders,
        column: "order_date",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_table_names() {
        assert_eq!(
            "order_items".parse::<TableName>().unwrap(),
            TableName::OrderItems
        );
        assert!("invoices".parse::<TableName>().is_err());
    }

    #[test]
    fn primary_key_is_first_column() {
        for table in TableName::LOAD_ORDER {
            assert_eq!(table.columns()[0], table.primary_key());
        }
    }

    #[test]
    fn order_items_have_two_foreign_keys() {
        let parents: Vec<_> = TableName::OrderItems
            .foreign_keys()
            .map(|fk| fk.referenced_table)
            .collect();
        assert_eq!(parents, vec![TableName::Orders, TableName::Products]);
    }
}
