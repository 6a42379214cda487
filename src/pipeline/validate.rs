// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate configuration and list what a pass would process.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("    Ledger: {}", config.ledger_path.display());
    log::info!("    Unreadable ledger: {:?}", config.ledger.on_unreadable);
    log::info!("    Default strategy: {}", config.fetch.strategy);
    log::info!("    Timeout: {}s", config.fetch.timeout_secs);
    log::info!("    Pacing: {}ms", config.pacing_ms);
    if config.telegram.alert_chat_id.is_some() {
        log::info!("    Alerts go to a separate chat");
    }

    log::info!("✓ {} targets", config.targets.len());
    for target in &config.targets {
        log::info!(
            "    {} [{}] {}",
            target.url,
            target.effective_strategy(config.fetch.strategy),
            target.selector
        );
    }

    Ok(())
}
