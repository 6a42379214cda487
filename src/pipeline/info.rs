// src/pipeline/info.rs

use crate::error::Result;
use crate::models::Config;
use crate::storage::{LinkStore, LocalLedger};

/// Show the ledger state and configured targets.
pub async fn run_info(config: &Config) -> Result<()> {
    let ledger = LocalLedger::open(&config.ledger_path, config.ledger.on_unreadable).await?;

    log::info!("Ledger: {}", ledger.path().display());
    if ledger.path().exists() {
        log::info!("Sent links: {}", ledger.len());
    } else {
        log::info!("No ledger yet; the first run will create it.");
    }

    log::info!("Targets: {}", config.targets.len());
    for target in &config.targets {
        log::info!(
            "    {} [{}]",
            target.url,
            target.effective_strategy(config.fetch.strategy)
        );
    }

    Ok(())
}
