//! Salesflow Binary - report, export and dashboard over one order dataset
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin salesflow -- report [PATH]
//! cargo run --release --bin salesflow -- export [PATH] --format xlsx|csv|json [--out DIR]
//! cargo run --release --bin salesflow -- dashboard [PATH]
//! ```
//!
//! ## Environment Variables
//!
//! - SALESFLOW_DATA_PATH - Order CSV used when PATH is omitted (default: data/ecommerce_data.csv)
//! - SALESFLOW_EXPORT_DIR - Export directory used when --out is omitted (default: exports)
//! - SALESFLOW_CURRENCY - Currency symbol for report and dashboard (default: ₹)
//! - SALESFLOW_TOP_N - Rows in "top N" sections (default: 5)
//! - RUST_LOG - Logging level (optional, default: info)

use clap::{Parser, Subcommand};
use salesflow::analysis_core::{DatasetLoader, SalesAnalyzer};
use salesflow::config::Config;
use salesflow::export::{ExportBundle, ExportFormat, ExportTarget, ReportWriter};
use salesflow::state::DashboardState;
use salesflow::text_report::render_report;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Parser)]
#[command(name = "salesflow", version, about = "E-commerce sales analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the analysis report
    Report {
        /// Order CSV (defaults to SALESFLOW_DATA_PATH)
        path: Option<PathBuf>,
    },
    /// Write the analysis to timestamped export files
    Export {
        path: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,
        /// Output directory (defaults to SALESFLOW_EXPORT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Browse the views in the terminal dashboard
    Dashboard { path: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    // Logs go to stderr so the report on stdout stays clean
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    log::info!("🚀 Starting Salesflow...");
    log::info!("📊 Configuration:");
    log::info!("   Data path: {}", config.data_path.display());
    log::info!("   Export dir: {}", config.export_dir.display());
    log::info!("   Currency: {} | Top N: {}", config.currency, config.top_n);

    match cli.command {
        Command::Report { path } => {
            let mut loader = DatasetLoader::new(path.unwrap_or_else(|| config.data_path.clone()));
            let analyzer = SalesAnalyzer::open_or_empty(&mut loader);
            let views = analyzer.compute_views().await?;

            print!(
                "{}",
                render_report(views.report.as_ref(), &views.trends, &config.currency, config.top_n)
            );
        }
        Command::Export { path, format, out } => {
            let mut loader = DatasetLoader::new(path.unwrap_or_else(|| config.data_path.clone()));
            let analyzer = SalesAnalyzer::open_or_empty(&mut loader);
            let views = analyzer.compute_views().await?;

            let (Some(report), Some(table)) = (views.report.as_ref(), analyzer.table()) else {
                return Err(format!("no data to export from {}", loader.path().display()).into());
            };

            let target = ExportTarget::now(out.unwrap_or_else(|| config.export_dir.clone()));
            let mut writer = ReportWriter::new(format, target);
            log::info!("💾 Exporting with {} backend", writer.backend_type());

            let bundle = ExportBundle {
                report,
                trends: &views.trends,
                table,
            };
            let files = writer.write(&bundle).await?;
            for file in files {
                println!("{}", file.display());
            }
        }
        Command::Dashboard { path } => {
            let loader = DatasetLoader::new(path.unwrap_or_else(|| config.data_path.clone()));
            let state = Arc::new(RwLock::new(DashboardState::new(
                loader,
                config.currency.clone(),
                config.top_n,
            )));
            state.write().await.refresh().await?;

            log::info!("✅ Views ready, starting dashboard");
            salesflow::ui::run_ui(state).await?;
        }
    }

    Ok(())
}
