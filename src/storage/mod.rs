//! Storage abstractions for the link ledger.
//!
//! The ledger is the set of every link ever notified. Entries are only ever
//! added; a link present in the ledger is never sent again.
//!
//! ## File Format
//!
//! ```text
//! sent_links.txt
//! https://www.ft.com/content/0a1b...
//! https://www.economist.com/finance-and-economics/2026/10/16/...
//! ```
//!
//! One absolute URL per line, append-only, no header, no ordering.

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalLedger;
pub use memory::MemoryLedger;

/// Trait for link ledger backends.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Whether the link has been notified before.
    fn contains(&self, link: &str) -> bool;

    /// Add a link to the ledger.
    ///
    /// Returns `false` without writing anything if the link was already
    /// present.
    async fn record(&mut self, link: &str) -> Result<bool>;

    /// Number of links in the ledger.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
