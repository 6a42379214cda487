//! Service layer for newsping.
//!
//! This module contains the side-effecting and transforming steps of a pass:
//! - Page fetching (`FetcherSet`, `HttpFetcher`, `BrowserFetcher`)
//! - Article extraction (`extract`, `ParsedPage`)
//! - Message delivery (`Channels`, `TelegramNotifier`, `LogNotifier`)

pub mod extractor;
pub mod fetcher;
pub mod notifier;

pub use extractor::{ParsedPage, extract};
pub use fetcher::{BrowserFetcher, FetcherSet, HttpFetcher, PageFetcher};
pub use notifier::{Channels, LogNotifier, Notifier, TELEGRAM_MESSAGE_LIMIT, TelegramNotifier};
