// src/models/mod.rs

//! Domain models for newsping.
//!
//! Configuration, watched targets, extracted candidates and pass reports.

mod article;
mod config;
mod report;
mod target;

// Re-export all public types
pub use article::{Candidate, Notification};
pub use config::{Config, FetchConfig, LedgerConfig, TelegramConfig, UnreadablePolicy};
pub use report::{PassReport, TargetOutcome, TargetReport};
pub use target::{FetchStrategy, SelectionRule, Target};
