//! Feeweb main entry point

use anyhow::Context;
use clap::Parser;
use feeweb_api::start_server;
use feeweb_config::Config;
use feeweb_core::FeeLedger;
use feeweb_ingest::JsonRecordSource;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "feeweb")]
#[command(author = "Feeweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight institutional fee ledger and collection reporting service", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let rt = Runtime::new().context("failed to start the async runtime")?;

    rt.block_on(async {
        let config = Config::load(args.config.clone())
            .context("failed to load configuration")?;

        eprintln!(
            "[INFO] Config loaded: data path={}, seed_file={}",
            config.data.path.to_string_lossy(),
            config.data.seed_file
        );

        let source = Arc::new(JsonRecordSource);
        let store = Arc::new(RwLock::new(FeeLedger::new(config.clone(), source)));

        // Seed the store if the data file exists
        let seed_path = config.seed_path();
        eprintln!("[INFO] Looking for seed file: {}", seed_path.to_string_lossy());

        if seed_path.exists() {
            eprintln!("[INFO] Seed file found, loading...");
            let mut store_guard = store.write().await;
            match store_guard.load(seed_path).await {
                Ok(_) => eprintln!("[INFO] Seed records loaded successfully"),
                Err(e) => eprintln!("[ERROR] Failed to load seed records: {:?}", e),
            }
        } else {
            eprintln!("[WARN] Seed file not found: {}", seed_path.display());
        }

        start_server(config, store).await;

        anyhow::Ok(())
    })?;

    Ok(())
}
