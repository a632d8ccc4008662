//! Sample Data Binary - synthetic dataset generator and Olist preparation
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin sample_data -- generate [--records N] [--seed S] [--out PATH]
//! cargo run --bin sample_data -- prepare --source DIR [--out PATH]
//! ```
//!
//! ## Environment Variables
//!
//! - SALESFLOW_DATA_PATH - Output CSV when --out is omitted (default: data/ecommerce_data.csv)
//! - SAMPLE_RECORDS - Orders to generate (default: 1000)
//! - SAMPLE_SEED - Fixed generator seed (optional)
//! - RUST_LOG - Logging level (optional, default: info)

use clap::{Parser, Subcommand};
use salesflow::config::Config;
use salesflow::{olist, sample};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sample_data", version, about = "Create an order dataset for salesflow")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a synthetic year of orders
    Generate {
        #[arg(long)]
        records: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build the order table from the Olist dataset files
    Prepare {
        /// Directory holding the olist_*_dataset.csv files
        #[arg(long)]
        source: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate { records, seed, out } => {
            let records = records.unwrap_or(config.sample_records);
            if records < 2 {
                return Err("--records must be at least 2".into());
            }
            let seed = seed.or(config.sample_seed);
            let out = out.unwrap_or(config.data_path);

            log::info!("🎲 Generating {} orders (seed: {:?})", records, seed);
            let table = sample::generate(records, seed);
            sample::write_table(&out, &table)?;
            log::info!("✅ Generated {} sample records in {}", table.len(), out.display());
        }
        Command::Prepare { source, out } => {
            let out = out.unwrap_or(config.data_path);

            let table = olist::prepare(&source)?;
            sample::write_table(&out, &table)?;
            log::info!("✅ Dataset prepared and saved to {}", out.display());
        }
    }

    Ok(())
}
