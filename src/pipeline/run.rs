// src/pipeline/run.rs

//! Single-pass entry point.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{Config, PassReport, Target};
use crate::services::{Channels, FetcherSet};
use crate::storage::{LinkStore, LocalLedger, MemoryLedger};
use crate::utils::http::create_async_client;

/// Options for one invocation of `run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Log messages instead of sending them and leave the ledger untouched
    pub dry_run: bool,
    /// Only process targets whose address contains this text
    pub target_filter: Option<String>,
}

/// Run one pass over the configured targets.
///
/// Fails only if the pass cannot start (ledger, HTTP client, target
/// selection). Per-target failures are reported in the returned
/// [`PassReport`] and on the alert channel.
pub async fn run_once(config: &Config, options: &RunOptions) -> Result<PassReport> {
    let targets = select_targets(&config.targets, options.target_filter.as_deref());
    if targets.is_empty() {
        return Err(AppError::config(format!(
            "No target matches '{}'",
            options.target_filter.as_deref().unwrap_or_default()
        )));
    }

    let ledger = LocalLedger::open(&config.ledger_path, config.ledger.on_unreadable).await?;
    log::info!(
        "Loaded {} sent links from {}",
        ledger.len(),
        ledger.path().display()
    );

    let fetchers = FetcherSet::from_config(&config.fetch)?;
    log::info!("Processing {} targets", targets.len());

    let report = if options.dry_run {
        log::info!("Dry run: nothing will be sent or recorded");
        let ledger = MemoryLedger::seeded(ledger.links().iter().cloned());
        let mut orchestrator =
            super::Orchestrator::new(fetchers, Channels::dry_run(), ledger, Duration::ZERO);
        orchestrator.run_pass(&targets).await
    } else {
        let client = create_async_client(&config.fetch)?;
        let channels = Channels::telegram(&config.telegram, client);
        let mut orchestrator =
            super::Orchestrator::new(fetchers, channels, ledger, config.pacing());
        orchestrator.run_pass(&targets).await
    };

    log_summary(&report);
    Ok(report)
}

fn select_targets(targets: &[Target], filter: Option<&str>) -> Vec<Target> {
    targets
        .iter()
        .filter(|t| filter.is_none_or(|f| t.url.as_str().contains(f)))
        .cloned()
        .collect()
}

fn log_summary(report: &PassReport) {
    log::info!(
        "Pass complete in {} ms: {} sent, {} with nothing new, {} empty, {} failed",
        report.elapsed_ms(),
        report.notified_count(),
        report.targets.len()
            - report.notified_count()
            - report.empty_count()
            - report.failure_count(),
        report.empty_count(),
        report.failure_count()
    );
}
