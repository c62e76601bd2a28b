//! Integrity-verifying SQLite loader for the ecomseed interchange files.
//!
//! Creates the normalized schema with enforced foreign keys, loads the five
//! CSV files in dependency order with primary-key dedupe, builds secondary
//! indexes, and verifies that no child row is orphaned.

pub mod analysis;
pub mod engine;
pub mod errors;
pub mod indexes;
pub mod insert;
pub mod integrity;
pub mod interchange;
pub mod model;
pub mod schema;
pub mod store;

pub use analysis::{CustomerProductSummary, customer_product_summary};
pub use engine::LoadEngine;
pub use errors::LoadError;
pub use integrity::{IntegrityReport, RelationshipCheck, TableCount};
pub use model::{
    FAILED_STATUS_LINE, IndexReport, LoadOptions, LoadReport, LoadWarning, RunStatus,
    TableLoadReport, VerifyReport,
};
pub use store::SqliteStore;
