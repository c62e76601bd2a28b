//! Seeded generation engine for the ecomseed e-commerce dataset.
//!
//! Produces customers, products, orders, order items and shipments in
//! dependency order from a single seeded RNG, verifies referential integrity
//! and date ordering, and writes the interchange CSV files.

pub mod checks;
pub mod choice;
pub mod engine;
pub mod errors;
pub mod faker;
pub mod generators;
pub mod model;
pub mod output;

pub use choice::Choice;
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use model::{GenerateOptions, GenerationReport, TableReport};
