//! CLI utility to import test cases from a CSV export.
//!
//! Usage: import-testcases <path/to/export.csv>
//!
//! Reads the database URL from the environment (same variables as the
//! server), runs pending migrations, then imports the file.

use std::path::PathBuf;

use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use qa_manager_lib::config::Config;
use qa_manager_lib::db::DbPool;
use qa_manager_lib::services::import_csv;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: {} <path/to/export.csv>", args[0]);
        std::process::exit(2);
    }
    let csv_path = PathBuf::from(&args[1]);
    if !csv_path.is_file() {
        error!("No such file: {}", csv_path.display());
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::connect(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.migrate().await {
        error!("Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    match import_csv(&pool, &csv_path).await {
        Ok(stats) => {
            info!(
                "Imported {} rows: {} new sections, {} new cases, {} already present",
                stats.rows, stats.sections_created, stats.cases_created, stats.cases_skipped
            );
        }
        Err(e) => {
            error!("Import failed: {}", e);
            std::process::exit(1);
        }
    }
}
