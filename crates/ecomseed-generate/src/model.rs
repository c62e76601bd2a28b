use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use ecomseed_core::TableName;

use crate::errors::GenerationError;

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed for the single RNG that drives the whole run.
    pub seed: u64,
    /// Directory where the interchange CSV files are written.
    pub out_dir: PathBuf,
    pub customers: u64,
    pub products: u64,
    pub orders: u64,
    pub order_items: u64,
    pub shipments: u64,
    /// First possible signup, launch and order date.
    pub start_date: NaiveDate,
    /// Global horizon for orders and shipments.
    pub end_date: NaiveDate,
    /// Last possible customer signup date.
    pub signup_end: NaiveDate,
    /// Last possible product launch date.
    pub launch_end: NaiveDate,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            out_dir: PathBuf::from("data"),
            customers: 1000,
            products: 500,
            orders: 2000,
            order_items: 4000,
            shipments: 1500,
            start_date: ymd(2022, 1, 1),
            end_date: ymd(2025, 10, 31),
            signup_end: ymd(2025, 10, 31),
            launch_end: ymd(2025, 9, 1),
        }
    }
}

impl GenerateOptions {
    pub fn rows(&self, table: TableName) -> u64 {
        match table {
            TableName::Customers => self.customers,
            TableName::Products => self.products,
            TableName::Orders => self.orders,
            TableName::OrderItems => self.order_items,
            TableName::Shipments => self.shipments,
        }
    }

    /// Reject date windows and counts that would make a constraint unsatisfiable.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.start_date > self.signup_end {
            return Err(GenerationError::InvalidOptions(format!(
                "start_date {} is after signup_end {}",
                self.start_date, self.signup_end
            )));
        }
        if self.signup_end > self.end_date {
            return Err(GenerationError::InvalidOptions(format!(
                "signup_end {} is after end_date {}",
                self.signup_end, self.end_date
            )));
        }
        if self.start_date > self.launch_end {
            return Err(GenerationError::InvalidOptions(format!(
                "start_date {} is after launch_end {}",
                self.start_date, self.launch_end
            )));
        }

        for table in TableName::LOAD_ORDER {
            if self.rows(table) == 0 {
                continue;
            }
            for fk in table.foreign_keys() {
                if self.rows(fk.referenced_table) == 0 {
                    return Err(GenerationError::InvalidOptions(format!(
                        "{} rows requested for {} but {} is empty",
                        self.rows(table),
                        table,
                        fk.referenced_table
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Summary of a generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: TableName,
    pub file: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub bytes_written: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub tables: Vec<TableReport>,
    /// Self-checks that passed before files were written.
    pub checks_passed: Vec<String>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tables: Vec::new(),
            checks_passed: Vec::new(),
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn rows_generated(&self, table: TableName) -> Option<u64> {
        self.tables
            .iter()
            .find(|report| report.table == table)
            .map(|report| report.rows_generated)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        GenerateOptions::default().validate().expect("defaults are valid");
    }

    #[test]
    fn rejects_signup_window_past_horizon() {
        let options = GenerateOptions {
            signup_end: ymd(2026, 1, 1),
            ..GenerateOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(GenerationError::InvalidOptions(_))
        ));
    }

    #[test]
    fn rejects_children_without_parents() {
        let options = GenerateOptions {
            products: 0,
            ..GenerateOptions::default()
        };
        let err = options.validate().expect_err("order items need products");
        assert!(err.to_string().contains("products is empty"));
    }

    #[test]
    fn partial_options_keep_defaults() {
        let options: GenerateOptions =
            serde_json::from_str(r#"{"seed": 7, "customers": 10}"#).expect("parse options");
        assert_eq!(options.seed, 7);
        assert_eq!(options.customers, 10);
        assert_eq!(options.orders, GenerateOptions::default().orders);
    }
}
