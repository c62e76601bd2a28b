mod config;
mod registry;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigError, load_config, render_config};
use ecomseed_generate::{GenerateOptions, GenerationEngine, GenerationError};
use ecomseed_load::{FAILED_STATUS_LINE, LoadEngine, LoadError, LoadOptions, RunStatus};
use registry::{RunContext, RunPaths, init_logging, start_run, write_artifact};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
}

#[derive(Parser, Debug)]
#[command(name = "ecomseed", version, about = "Synthetic e-commerce dataset generator and SQLite loader")]
struct Cli {
    /// TOML file with [generate] and [load] sections.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long, global = true, default_value = "runs")]
    run_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the five interchange CSV files.
    Generate(GenerateArgs),
    /// Load the interchange files into SQLite and verify integrity.
    Load(LoadArgs),
    /// Report row counts and orphans of an existing database.
    Verify(DatabaseArgs),
    /// Print the customer x product summary of an existing database.
    Analyze(AnalyzeArgs),
    /// Print the resolved configuration as TOML.
    Config,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long)]
    customers: Option<u64>,
    #[arg(long)]
    products: Option<u64>,
    #[arg(long)]
    orders: Option<u64>,
    #[arg(long)]
    order_items: Option<u64>,
    #[arg(long)]
    shipments: Option<u64>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    signup_end: Option<NaiveDate>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    launch_end: Option<NaiveDate>,
}

impl GenerateArgs {
    fn apply(self, mut options: GenerateOptions) -> GenerateOptions {
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if let Some(out_dir) = self.out_dir {
            options.out_dir = out_dir;
        }
        let counts = [
            (self.customers, &mut options.customers),
            (self.products, &mut options.products),
            (self.orders, &mut options.orders),
            (self.order_items, &mut options.order_items),
            (self.shipments, &mut options.shipments),
        ];
        for (flag, target) in counts {
            if let Some(value) = flag {
                *target = value;
            }
        }
        let dates = [
            (self.start_date, &mut options.start_date),
            (self.end_date, &mut options.end_date),
            (self.signup_end, &mut options.signup_end),
            (self.launch_end, &mut options.launch_end),
        ];
        for (flag, target) in dates {
            if let Some(value) = flag {
                *target = value;
            }
        }
        options
    }
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Directory holding the interchange files.
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// SQLite database file.
    #[arg(long)]
    database: Option<PathBuf>,
    /// Keep existing tables instead of dropping them.
    #[arg(long, default_value_t = false)]
    no_reset: bool,
    #[arg(long)]
    batch_size: Option<usize>,
}

impl LoadArgs {
    fn apply(self, mut options: LoadOptions) -> LoadOptions {
        if let Some(input_dir) = self.input_dir {
            options.input_dir = input_dir;
        }
        if let Some(database) = self.database {
            options.database = database;
        }
        if self.no_reset {
            options.reset = false;
        }
        if let Some(batch_size) = self.batch_size {
            options.batch_size = batch_size;
        }
        options
    }
}

#[derive(Args, Debug)]
struct DatabaseArgs {
    /// SQLite database file.
    #[arg(long)]
    database: Option<PathBuf>,
}

impl DatabaseArgs {
    fn apply(self, mut options: LoadOptions) -> LoadOptions {
        if let Some(database) = self.database {
            options.database = database;
        }
        options
    }
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    database: DatabaseArgs,
    /// Number of rows to return.
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(Some(status)) => {
            println!("{}", status.status_line());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_failed", error = %err);
            eprintln!("error: {err}");
            println!("{FAILED_STATUS_LINE}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Option<RunStatus>, CliError> {
    let Cli {
        config: config_file,
        run_dir,
        command,
    } = cli;
    let config = load_config(config_file.as_deref())?;
    let runs = Runs {
        run_dir,
        config_file,
    };

    match command {
        Command::Generate(args) => run_generate(&runs, args.apply(config.generate)).map(Some),
        Command::Load(args) => run_load(&runs, args.apply(config.load)).await.map(Some),
        Command::Verify(args) => run_verify(&runs, args.apply(config.load)).await.map(Some),
        Command::Analyze(args) => {
            let options = args.database.apply(config.load);
            run_analyze(&runs, options, args.limit).await.map(Some)
        }
        Command::Config => {
            print!("{}", render_config(&config)?);
            Ok(None)
        }
    }
}

/// Where run artifacts go for this invocation.
struct Runs {
    run_dir: PathBuf,
    config_file: Option<PathBuf>,
}

impl Runs {
    fn open<T: Serialize>(&self, command: &str, options: &T) -> Result<RunPaths, CliError> {
        let run_id = Uuid::new_v4().to_string();
        let ctx = RunContext {
            run_id: run_id.clone(),
            started_at: chrono::Utc::now(),
            command: command.to_string(),
            run_dir: self.run_dir.clone(),
            config_file: self.config_file.clone(),
            options: serde_json::to_value(options).map_err(registry::RegistryError::from)?,
        };

        let paths = start_run(&ctx)?;
        init_logging(&paths.logs_path)?;

        tracing::info!(
            event = "run_started",
            run_id = %run_id,
            command,
            run_root = %paths.root.display(),
            config = %paths.config_path.display()
        );
        Ok(paths)
    }
}

fn run_generate(runs: &Runs, options: GenerateOptions) -> Result<RunStatus, CliError> {
    let paths = runs.open("generate", &options)?;
    let timer = Instant::now();

    let result = GenerationEngine::new(options).run()?;
    let report_path = write_artifact(&paths, "generation_report.json", &result.report)?;
    tracing::info!(event = "report_written", path = %report_path.display());

    for table in &result.report.tables {
        eprintln!(
            "{:<12} {:>8} rows  {:>10} bytes",
            table.table.as_str(),
            table.rows_generated,
            table.bytes_written
        );
    }

    finish(RunStatus::Success, timer)
}

async fn run_load(runs: &Runs, options: LoadOptions) -> Result<RunStatus, CliError> {
    let paths = runs.open("load", &options)?;
    let timer = Instant::now();

    let report = LoadEngine::new(options).run().await?;
    let report_path = write_artifact(&paths, "load_report.json", &report)?;
    tracing::info!(event = "report_written", path = %report_path.display());

    for table in &report.tables {
        eprintln!(
            "{:<12} read {:>8}  duplicates {:>6}  inserted {:>8}",
            table.table.as_str(),
            table.rows_read,
            table.duplicates_removed,
            table.rows_inserted
        );
    }
    print_integrity(&report.integrity);

    finish(report.status(), timer)
}

async fn run_verify(runs: &Runs, options: LoadOptions) -> Result<RunStatus, CliError> {
    let paths = runs.open("verify", &options)?;
    let timer = Instant::now();

    let report = LoadEngine::new(options).verify().await?;
    let report_path = write_artifact(&paths, "verify_report.json", &report)?;
    tracing::info!(event = "report_written", path = %report_path.display());

    for count in &report.row_counts {
        eprintln!("{:<12} {:>8} rows", count.table.as_str(), count.rows);
    }
    print_integrity(&report.integrity);

    finish(report.status(), timer)
}

async fn run_analyze(runs: &Runs, options: LoadOptions, limit: u32) -> Result<RunStatus, CliError> {
    let paths = runs.open("analyze", &options)?;
    let timer = Instant::now();

    let rows = LoadEngine::new(options).analyze(limit).await?;
    let report_path = write_artifact(&paths, "analysis.json", &rows)?;
    tracing::info!(event = "report_written", path = %report_path.display());

    println!("customer\tproduct\torders\tquantity\trevenue\tfirst_order\tlast_order\tshipping");
    for row in &rows {
        println!(
            "{}\t{}\t{}\t{}\t{:.2}\t{}\t{}\t{:.2}",
            row.customer_name,
            row.product_name,
            row.order_count,
            row.total_quantity,
            row.total_revenue,
            row.first_order_date,
            row.most_recent_order_date,
            row.total_shipping_cost
        );
    }

    finish(RunStatus::Success, timer)
}

fn print_integrity(integrity: &ecomseed_load::IntegrityReport) {
    for check in &integrity.checks {
        let verdict = if check.passed { "PASS" } else { "FAIL" };
        eprintln!(
            "{verdict} {:<26} orphans {}",
            check.relationship, check.orphans
        );
    }
}

fn finish(status: RunStatus, timer: Instant) -> Result<RunStatus, CliError> {
    let duration_ms = timer.elapsed().as_millis() as u64;
    tracing::info!(
        event = "run_finished",
        status = status.status_line(),
        duration_ms
    );
    Ok(status)
}
