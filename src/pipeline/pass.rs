// src/pipeline/pass.rs

//! One pass over all targets.
//!
//! Per target: fetch → extract → skip known links → record → notify.
//! A failing target is reported on the alert channel and the pass moves on.

use std::time::Duration;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{PassReport, Target, TargetOutcome, TargetReport};
use crate::services::{Channels, FetcherSet, TELEGRAM_MESSAGE_LIMIT, extract};
use crate::storage::LinkStore;

/// Article notifications allowed per target in one pass.
pub const NOTIFICATIONS_PER_TARGET: usize = 1;

/// Drives passes over the configured targets.
pub struct Orchestrator<L> {
    fetchers: FetcherSet,
    channels: Channels,
    ledger: L,
    pacing: Duration,
}

impl<L: LinkStore> Orchestrator<L> {
    pub fn new(fetchers: FetcherSet, channels: Channels, ledger: L, pacing: Duration) -> Self {
        Self {
            fetchers,
            channels,
            ledger,
            pacing,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Process every target in order and report what happened to each.
    pub async fn run_pass(&mut self, targets: &[Target]) -> PassReport {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(targets.len());

        for target in targets {
            log::info!("Checking {}", target.url);

            let outcome = match self.process_target(target).await {
                Ok(outcome) => outcome,
                Err(AppError::NoCandidates { url, selector }) => {
                    log::warn!("No sections found on {url} using selector '{selector}'.");
                    self.alert(&format!(
                        "No articles found on {url}. Check the HTML selector."
                    ))
                    .await;
                    TargetOutcome::NoCandidates
                }
                Err(e) => {
                    log::error!("Error scraping {}: {}", target.url, e);
                    self.alert(&format!("Error scraping {}: {}", target.url, e))
                        .await;
                    TargetOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            reports.push(TargetReport {
                url: target.url.to_string(),
                outcome,
            });
        }

        PassReport {
            started_at,
            finished_at: Utc::now(),
            targets: reports,
        }
    }

    async fn process_target(&mut self, target: &Target) -> Result<TargetOutcome> {
        let html = self.fetchers.fetch_target(target).await?;
        let candidates = extract(&html, &target.selector, &target.link_attr, &target.url);
        log::debug!("{} candidates on {}", candidates.len(), target.url);

        if candidates.is_empty() {
            return Err(AppError::no_candidates(
                target.url.as_str(),
                target.selector.as_str(),
            ));
        }

        let mut sent = 0;
        let mut outcome = TargetOutcome::NothingNew;

        for candidate in candidates {
            if sent >= NOTIFICATIONS_PER_TARGET {
                break;
            }

            let Some(notification) = candidate.to_notification() else {
                log::debug!("Skipping '{}': no usable link", candidate.title);
                continue;
            };
            if self.ledger.contains(notification.link.as_str()) {
                continue;
            }

            // Recorded first: a failed send must not lead to a resend next pass.
            self.ledger.record(notification.link.as_str()).await?;
            let text = notification.format_within(TELEGRAM_MESSAGE_LIMIT);
            self.channels.content.notify(&text).await?;
            log::info!("Sent: {}", notification.title);

            sent += 1;
            outcome = TargetOutcome::Notified {
                title: notification.title,
                link: notification.link.to_string(),
            };

            if !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        Ok(outcome)
    }

    /// Send an operator alert. Delivery failures are only logged.
    async fn alert(&self, text: &str) {
        if let Err(e) = self.channels.alerts.notify(text).await {
            log::error!("Failed to deliver alert: {e}");
        }
    }
}
