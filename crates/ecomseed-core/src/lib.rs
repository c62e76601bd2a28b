//! Core contracts shared by the ecomseed generator and loader.
//!
//! This crate defines the entity records, the closed enumerations they use,
//! and the table catalog (file names, keys, foreign keys, indexes) that both
//! sides of the interchange agree on.

pub mod catalog;
pub mod entities;
pub mod enums;
pub mod error;
pub mod validation;

pub use catalog::{FOREIGN_KEYS, ForeignKey, INDEXES, IndexDef, TableName};
pub use entities::{Customer, Dataset, Order, OrderItem, Product, Record, Shipment};
pub use enums::{COUNTRIES, Carrier, Category, OrderStatus};
pub use error::{Error, Result};
pub use validation::validate_catalog;
