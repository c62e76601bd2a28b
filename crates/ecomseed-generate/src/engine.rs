use std::path::PathBuf;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use ecomseed_core::{Dataset, TableName};

use crate::checks::verify_dataset;
use crate::errors::GenerationError;
use crate::faker::{FakeNames, NameSource};
use crate::generators::{
    generate_customers, generate_order_items, generate_orders, generate_products,
    generate_shipments,
};
use crate::model::{GenerateOptions, GenerationReport, TableReport};
use crate::output::csv::write_table_csv;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for generating the e-commerce dataset.
pub struct GenerationEngine {
    options: GenerateOptions,
    names: Box<dyn NameSource>,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self::with_names(options, Box::new(FakeNames))
    }

    /// Use a custom name source instead of the `fake` crate.
    pub fn with_names(options: GenerateOptions, names: Box<dyn NameSource>) -> Self {
        Self { options, names }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate and self-verify the dataset without writing files.
    pub fn generate(&self) -> Result<Dataset, GenerationError> {
        self.options.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.options.seed);
        let dataset = generate_dataset(&mut rng, self.names.as_ref(), &self.options)?;
        verify_dataset(&dataset, &self.options)?;
        Ok(dataset)
    }

    /// Generate, verify, and write the five interchange files.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let options = &self.options;
        options.validate()?;

        info!(
            seed = options.seed,
            out_dir = %options.out_dir.display(),
            "generation started"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
        let dataset = generate_dataset(&mut rng, self.names.as_ref(), options)?;

        let checks = match verify_dataset(&dataset, options) {
            Ok(checks) => checks,
            Err(err) => {
                warn!(error = %err, "generation self-check failed");
                return Err(err);
            }
        };
        info!(checks = checks.len(), "referential integrity checks passed");

        std::fs::create_dir_all(&options.out_dir)?;
        let mut report = GenerationReport::new(options.seed);
        report.checks_passed = checks.iter().map(|check| check.to_string()).collect();

        for table in TableName::LOAD_ORDER {
            let path = options.out_dir.join(table.file_name());
            let bytes_written = match table {
                TableName::Customers => write_table_csv(&path, &dataset.customers)?,
                TableName::Products => write_table_csv(&path, &dataset.products)?,
                TableName::Orders => write_table_csv(&path, &dataset.orders)?,
                TableName::OrderItems => write_table_csv(&path, &dataset.order_items)?,
                TableName::Shipments => write_table_csv(&path, &dataset.shipments)?,
            };
            let rows_generated = dataset.row_count(table) as u64;

            info!(
                table = %table,
                rows = rows_generated,
                bytes = bytes_written,
                path = %path.display(),
                "table written"
            );

            report.bytes_written += bytes_written;
            report.tables.push(TableReport {
                table,
                file: table.file_name().to_string(),
                rows_requested: options.rows(table),
                rows_generated,
                bytes_written,
            });
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            tables = report.tables.len(),
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult {
            out_dir: options.out_dir.clone(),
            dataset,
            report,
        })
    }
}

/// Generate all five collections in dependency order from one RNG.
pub fn generate_dataset<R: Rng>(
    rng: &mut R,
    names: &dyn NameSource,
    options: &GenerateOptions,
) -> Result<Dataset, GenerationError> {
    let customers = generate_customers(rng, names, options)?;
    info!(rows = customers.len(), "generated customers");
    let products = generate_products(rng, names, options)?;
    info!(rows = products.len(), "generated products");
    let orders = generate_orders(rng, &customers, options)?;
    info!(rows = orders.len(), "generated orders");
    let order_items = generate_order_items(rng, &orders, &products, options)?;
    info!(rows = order_items.len(), "generated order items");
    let shipments = generate_shipments(rng, &orders, options)?;
    info!(rows = shipments.len(), "generated shipments");

    Ok(Dataset {
        customers,
        products,
        orders,
        order_items,
        shipments,
    })
}
